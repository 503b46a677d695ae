// Test utility module for msapriori integration tests
#![allow(dead_code)]

use msapriori::{Item, Itemset, MiningOutcome, Transaction, TransactionStore};
use std::path::PathBuf;

/// Build a store from literal rows.
pub fn store(rows: &[&[Item]]) -> TransactionStore {
    rows.iter()
        .map(|row| Transaction::new(row.iter().copied()))
        .collect()
}

/// Itemsets of one level, in result order.
pub fn itemsets(outcome: &MiningOutcome, length: usize) -> Vec<Itemset> {
    outcome
        .results
        .level(length)
        .unwrap_or_default()
        .iter()
        .map(|record| record.itemset.clone())
        .collect()
}

/// Brute-force support count used as a reference.
pub fn brute_force_support(rows: &[Vec<Item>], itemset: &Itemset) -> usize {
    rows.iter()
        .filter(|row| itemset.iter().all(|item| row.contains(&item)))
        .count()
}

// Helper to create temporary input files
pub fn create_test_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}
