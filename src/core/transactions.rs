//! The transaction database scanned by every support query.

use super::types::{Item, Itemset};
use std::collections::BTreeSet;

/// One transaction: the distinct items it contains, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    items: Vec<Item>,
}

impl Transaction {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_all(&self, itemset: &Itemset) -> bool {
        itemset.is_subset_of(&self.items)
    }
}

/// The ordered, read-only transaction database for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Number of transactions that contain every item of `itemset`.
    pub fn count_containing(&self, itemset: &Itemset) -> usize {
        self.transactions
            .iter()
            .filter(|transaction| transaction.contains_all(itemset))
            .count()
    }

    /// Every item that appears in at least one transaction, ascending.
    pub fn distinct_items(&self) -> BTreeSet<Item> {
        self.transactions
            .iter()
            .flat_map(|transaction| transaction.items().iter().copied())
            .collect()
    }
}

impl FromIterator<Transaction> for TransactionStore {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TransactionStore {
        [vec![1, 2, 3], vec![1, 2], vec![3, 1], vec![2, 3], vec![1]]
            .into_iter()
            .map(Transaction::new)
            .collect()
    }

    #[test]
    fn transaction_collapses_duplicates() {
        let transaction = Transaction::new([4, 2, 4, 1]);
        assert_eq!(transaction.items(), &[1, 2, 4]);
        assert_eq!(transaction.len(), 3);
    }

    #[test]
    fn counts_superset_transactions() {
        let store = store();
        assert_eq!(store.count_containing(&Itemset::new([1])), 4);
        assert_eq!(store.count_containing(&Itemset::new([1, 2])), 2);
        assert_eq!(store.count_containing(&Itemset::new([1, 2, 3])), 1);
        assert_eq!(store.count_containing(&Itemset::new([4])), 0);
    }

    #[test]
    fn distinct_items_are_sorted() {
        let items: Vec<Item> = store().distinct_items().into_iter().collect();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
