pub mod errors;
pub mod transactions;
pub mod types;

pub use errors::{Error, Result};
pub use transactions::{Transaction, TransactionStore};
pub use types::{
    FrequentRecord, Item, Itemset, LevelResults, LevelStats, MiningOutcome, MiningStats,
};
