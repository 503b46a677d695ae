//! Support counting and per-itemset metrics over one transaction store.

use crate::core::{FrequentRecord, Item, Itemset, TransactionStore};
use crate::params::ParameterTable;
use dashmap::DashMap;

/// Answers support, tail count and price queries for one mining run.
///
/// Singleton support ratios are memoized per instance. The store is
/// immutable for the run, so cached values are never invalidated.
#[derive(Debug)]
pub struct SupportOracle<'a> {
    store: &'a TransactionStore,
    params: &'a ParameterTable,
    singleton_supports: DashMap<Item, f64>,
}

impl<'a> SupportOracle<'a> {
    pub fn new(store: &'a TransactionStore, params: &'a ParameterTable) -> Self {
        Self {
            store,
            params,
            singleton_supports: DashMap::new(),
        }
    }

    pub fn params(&self) -> &'a ParameterTable {
        self.params
    }

    pub fn store(&self) -> &'a TransactionStore {
        self.store
    }

    pub fn total_transactions(&self) -> usize {
        self.store.len()
    }

    pub fn support_count(&self, itemset: &Itemset) -> usize {
        self.store.count_containing(itemset)
    }

    pub fn support_ratio(&self, support_count: usize) -> f64 {
        support_count as f64 / self.total_transactions() as f64
    }

    /// Support ratio of a single item, computed once per run.
    pub fn singleton_support(&self, item: Item) -> f64 {
        if let Some(ratio) = self.singleton_supports.get(&item) {
            return *ratio;
        }
        let count = self.support_count(&Itemset::singleton(item));
        let ratio = self.support_ratio(count);
        *self.singleton_supports.entry(item).or_insert(ratio)
    }

    /// Seed the singleton cache from an externally computed occurrence count.
    pub fn cache_singleton(&self, item: Item, count: usize) -> f64 {
        let ratio = self.support_ratio(count);
        *self.singleton_supports.entry(item).or_insert(ratio)
    }

    pub fn cached_singletons(&self) -> usize {
        self.singleton_supports.len()
    }

    /// Support of everything except the largest item; the store size for
    /// singletons.
    pub fn tail_count(&self, itemset: &Itemset) -> usize {
        if itemset.len() <= 1 {
            return self.total_transactions();
        }
        self.support_count(&itemset.prefix())
    }

    pub fn average_price(&self, itemset: &Itemset) -> f64 {
        debug_assert!(!itemset.is_empty(), "average price of an empty itemset");
        let total: f64 = itemset.iter().map(|item| self.params.price(item)).sum();
        total / itemset.len() as f64
    }

    /// Smallest MIS among the members.
    pub fn min_mis(&self, itemset: &Itemset) -> f64 {
        itemset
            .iter()
            .map(|item| self.params.mis(item))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn record(&self, itemset: Itemset, support_count: usize) -> FrequentRecord {
        FrequentRecord {
            tail_count: self.tail_count(&itemset),
            average_price: self.average_price(&itemset),
            support_count,
            itemset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transaction;

    fn store() -> TransactionStore {
        [vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3], vec![1]]
            .into_iter()
            .map(Transaction::new)
            .collect()
    }

    #[test]
    fn tail_count_of_singleton_is_store_size() {
        let store = store();
        let params = ParameterTable::default();
        let oracle = SupportOracle::new(&store, &params);
        assert_eq!(oracle.tail_count(&Itemset::new([2])), 5);
    }

    #[test]
    fn tail_count_drops_largest_item() {
        let store = store();
        let params = ParameterTable::default();
        let oracle = SupportOracle::new(&store, &params);
        // prefix {1, 2} appears in two transactions
        assert_eq!(oracle.tail_count(&Itemset::new([3, 1, 2])), 2);
        assert_eq!(oracle.tail_count(&Itemset::new([2, 3])), 3);
    }

    #[test]
    fn singleton_support_is_memoized() {
        let store = store();
        let params = ParameterTable::default();
        let oracle = SupportOracle::new(&store, &params);

        assert_eq!(oracle.cached_singletons(), 0);
        assert_eq!(oracle.singleton_support(1), 0.8);
        assert_eq!(oracle.singleton_support(1), 0.8);
        assert_eq!(oracle.cached_singletons(), 1);
    }

    #[test]
    fn separate_oracles_do_not_share_cache() {
        let store = store();
        let params = ParameterTable::default();
        let first = SupportOracle::new(&store, &params);
        first.singleton_support(2);

        let second = SupportOracle::new(&store, &params);
        assert_eq!(second.cached_singletons(), 0);
    }

    #[test]
    fn average_price_uses_defaults_and_overrides() {
        let store = store();
        let params = ParameterTable::builder()
            .price(1, 10.0)
            .price_rest(4.0)
            .build();
        let oracle = SupportOracle::new(&store, &params);
        assert_eq!(oracle.average_price(&Itemset::new([1, 2])), 7.0);
        assert_eq!(oracle.average_price(&Itemset::new([3])), 4.0);
    }

    #[test]
    fn min_mis_picks_lowest_member_threshold() {
        let store = store();
        let params = ParameterTable::builder()
            .mis(1, 0.5)
            .mis(2, 0.1)
            .mis_rest(0.3)
            .build();
        let oracle = SupportOracle::new(&store, &params);
        assert_eq!(oracle.min_mis(&Itemset::new([1, 2, 3])), 0.1);
        assert_eq!(oracle.min_mis(&Itemset::new([1, 3])), 0.3);
    }
}
