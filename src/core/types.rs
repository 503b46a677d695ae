//! Itemsets, per-level results and run statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque item identifier. Loaders guarantee it is never zero.
pub type Item = u32;

/// A set of distinct items.
///
/// Stored as an ascending, duplicate-free vector so that derived equality,
/// ordering and hashing are all set-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct Itemset(Vec<Item>);

impl Itemset {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn singleton(item: Item) -> Self {
        Self(vec![item])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items in ascending identifier order.
    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.iter().copied()
    }

    /// Smallest identifier in the set.
    pub fn first(&self) -> Option<Item> {
        self.0.first().copied()
    }

    /// The set with its largest identifier removed.
    pub fn prefix(&self) -> Itemset {
        let end = self.0.len().saturating_sub(1);
        Self(self.0[..end].to_vec())
    }

    pub fn without(&self, item: Item) -> Itemset {
        Self(self.0.iter().copied().filter(|&i| i != item).collect())
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        Self::new(self.iter().chain(other.iter()))
    }

    /// True when both sets share their first `n` items in identifier order.
    pub fn shares_prefix(&self, other: &Itemset, n: usize) -> bool {
        self.0.len() >= n && other.0.len() >= n && self.0[..n] == other.0[..n]
    }

    /// Subset test against an ascending item slice.
    pub fn is_subset_of(&self, sorted: &[Item]) -> bool {
        self.0.iter().all(|item| sorted.binary_search(item).is_ok())
    }
}

impl From<Vec<Item>> for Itemset {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl From<Itemset> for Vec<Item> {
    fn from(itemset: Itemset) -> Self {
        itemset.0
    }
}

impl<const N: usize> From<[Item; N]> for Itemset {
    fn from(items: [Item; N]) -> Self {
        Self::new(items)
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "({joined})")
    }
}

/// A surviving itemset together with the metrics reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentRecord {
    pub itemset: Itemset,
    pub support_count: usize,
    pub tail_count: usize,
    pub average_price: f64,
}

/// Frequent records grouped by itemset length, iterated in ascending length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelResults {
    levels: BTreeMap<usize, Vec<FrequentRecord>>,
}

impl LevelResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_level(&mut self, length: usize, records: Vec<FrequentRecord>) {
        self.levels.insert(length, records);
    }

    pub fn level(&self, length: usize) -> Option<&[FrequentRecord]> {
        self.levels.get(&length).map(Vec::as_slice)
    }

    pub fn levels(&self) -> impl Iterator<Item = (usize, &[FrequentRecord])> {
        self.levels
            .iter()
            .map(|(length, records)| (*length, records.as_slice()))
    }

    /// Length of the longest recorded level, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.levels.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn total_itemsets(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.level(itemset.len())
            .is_some_and(|records| records.iter().any(|r| &r.itemset == itemset))
    }
}

/// Counters for one mining level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub length: usize,
    pub generated: usize,
    pub pruned: usize,
    pub survivors: usize,
}

/// Summary of a mining run, reported alongside the results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningStats {
    pub transactions: usize,
    pub distinct_items: usize,
    pub anchor_item: Option<Item>,
    pub levels: Vec<LevelStats>,
}

/// Everything a mining run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiningOutcome {
    pub results: LevelResults,
    pub stats: MiningStats,
}
