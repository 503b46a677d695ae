//! The MS-Apriori mining core.
//!
//! Everything here is a pure computation over a loaded
//! [`TransactionStore`](crate::core::TransactionStore) and
//! [`ParameterTable`](crate::params::ParameterTable); nothing fails and
//! nothing touches the filesystem.

pub mod candidates;
pub mod constraints;
pub mod driver;
pub mod oracle;

pub use candidates::{
    init_pass, join, level2_candidates, level_k_candidates, prune, requires_frequent_subset,
    sort_by_mis, CandidateBatch, InitialPass,
};
pub use constraints::{ConstraintEvaluator, Rejection, TOLERANCE};
pub use driver::{mine, Miner, MiningOptions, MiningPhase};
pub use oracle::SupportOracle;
