// Export modules for library usage
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod mining;
pub mod params;

// Re-export commonly used types
pub use crate::core::{
    Error, FrequentRecord, Item, Itemset, LevelResults, LevelStats, MiningOutcome, MiningStats,
    Result, Transaction, TransactionStore,
};

pub use crate::params::ParameterTable;

pub use crate::mining::{mine, Miner, MiningOptions, MiningPhase, SupportOracle};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::io::loader::{
    load_parameters, load_transactions, parse_parameters, parse_parameters_toml,
    parse_transactions,
};
