//! Candidate generation for MS-Apriori.
//!
//! Per-item MIS values break plain Apriori anti-monotonicity, so both the
//! seed selection and the subset prune differ from the textbook algorithm:
//!
//! - the initial pass judges every item against `MIS(M)`, where `M` is the
//!   first item in `(MIS, id)` order that clears its own MIS;
//! - level-2 pairs are only formed from an item that clears its own MIS;
//! - the level-k prune only requires a `(k-1)`-subset to be frequent when it
//!   still contains the candidate's first item `c1`, or when the removed item
//!   has the same MIS as `c1`.

use super::constraints::ConstraintEvaluator;
use super::oracle::SupportOracle;
use crate::core::{FrequentRecord, Item, Itemset};
use crate::params::ParameterTable;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Result of the first scan over the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialPass {
    /// First item in MIS order whose support clears its own MIS.
    pub anchor: Option<Item>,
    /// Items observed in any transaction, sorted by `(MIS, id)`.
    pub ordered_items: Vec<Item>,
    pub frequent: Vec<FrequentRecord>,
}

/// Candidates for one level along with how many the prune removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateBatch {
    pub candidates: Vec<Itemset>,
    pub generated: usize,
    pub pruned: usize,
}

/// Items sorted ascending by MIS, ties broken by identifier.
pub fn sort_by_mis(items: impl IntoIterator<Item = Item>, params: &ParameterTable) -> Vec<Item> {
    let mut items: Vec<Item> = items.into_iter().collect();
    items.sort_by(|a, b| {
        params
            .mis(*a)
            .total_cmp(&params.mis(*b))
            .then_with(|| a.cmp(b))
    });
    items
}

pub fn init_pass(oracle: &SupportOracle<'_>) -> InitialPass {
    let params = oracle.params();

    let mut counts: HashMap<Item, usize> = HashMap::new();
    for transaction in oracle.store().iter() {
        for &item in transaction.items() {
            *counts.entry(item).or_default() += 1;
        }
    }

    let ordered_items = sort_by_mis(counts.keys().copied(), params);
    let supports: HashMap<Item, f64> = ordered_items
        .iter()
        .map(|&item| (item, oracle.cache_singleton(item, counts[&item])))
        .collect();

    let anchor = ordered_items
        .iter()
        .copied()
        .find(|item| supports[item] >= params.mis(*item));

    let Some(anchor) = anchor else {
        debug!(items = ordered_items.len(), "No item reaches its own MIS");
        return InitialPass {
            anchor: None,
            ordered_items,
            frequent: Vec::new(),
        };
    };

    // Every item is held to MIS(M), not to its own MIS.
    let threshold = params.mis(anchor);
    let evaluator = ConstraintEvaluator::new(oracle);
    let frequent = ordered_items
        .iter()
        .copied()
        .filter(|item| supports[item] >= threshold)
        .map(Itemset::singleton)
        .filter(|itemset| evaluator.satisfies_avpt(itemset))
        .map(|itemset| {
            let count = counts[&itemset.items()[0]];
            oracle.record(itemset, count)
        })
        .collect();

    debug!(anchor, threshold, "Selected anchor item");
    InitialPass {
        anchor: Some(anchor),
        ordered_items,
        frequent,
    }
}

/// Pairs from the frequent singletons, in list order, whose first member
/// clears its own MIS.
pub fn level2_candidates(frequent: &[FrequentRecord], oracle: &SupportOracle<'_>) -> Vec<Itemset> {
    let params = oracle.params();
    let items: Vec<Item> = frequent
        .iter()
        .filter_map(|record| record.itemset.first())
        .collect();

    let mut candidates = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        if oracle.singleton_support(first) < params.mis(first) {
            continue;
        }
        for &second in &items[i + 1..] {
            candidates.push(Itemset::new([first, second]));
        }
    }
    dedup_candidates(candidates)
}

/// Prefix join of the previous level's itemsets into size-`k` candidates.
pub fn join(previous: &[FrequentRecord], k: usize) -> Vec<Itemset> {
    let shared = k.saturating_sub(2);
    let mut candidates = Vec::new();
    for (i, left) in previous.iter().enumerate() {
        for right in &previous[i + 1..] {
            if !left.itemset.shares_prefix(&right.itemset, shared) {
                continue;
            }
            let union = left.itemset.union(&right.itemset);
            if union.len() == k {
                candidates.push(union);
            }
        }
    }
    dedup_candidates(candidates)
}

/// Whether removing `removed` from a candidate whose smallest item is `c1`
/// leaves a subset that must already be frequent.
pub fn requires_frequent_subset(c1: Item, removed: Item, params: &ParameterTable) -> bool {
    let subset_keeps_c1 = removed != c1;
    subset_keeps_c1 || params.mis(removed) == params.mis(c1)
}

pub fn prune(
    candidates: Vec<Itemset>,
    previous: &[FrequentRecord],
    params: &ParameterTable,
) -> Vec<Itemset> {
    let known: HashSet<&Itemset> = previous.iter().map(|record| &record.itemset).collect();
    candidates
        .into_iter()
        .filter(|candidate| {
            let Some(c1) = candidate.first() else {
                return false;
            };
            candidate
                .iter()
                .filter(|&removed| requires_frequent_subset(c1, removed, params))
                .all(|removed| known.contains(&candidate.without(removed)))
        })
        .collect()
}

/// Join then prune for levels of size three and up.
pub fn level_k_candidates(
    previous: &[FrequentRecord],
    k: usize,
    params: &ParameterTable,
) -> CandidateBatch {
    let joined = join(previous, k);
    let generated = joined.len();
    let candidates = prune(joined, previous, params);
    CandidateBatch {
        pruned: generated - candidates.len(),
        generated,
        candidates,
    }
}

/// Drop repeated candidates, keeping first-seen order.
fn dedup_candidates(candidates: Vec<Itemset>) -> Vec<Itemset> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}
