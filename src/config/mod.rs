//! Run settings for the command-line tool.
//!
//! Mining thresholds live in the parameter file (see [`crate::params`]);
//! this module only covers how a run is executed and reported.

mod core;
mod loader;

pub use self::core::{LoggingConfig, MinerConfig, OutputConfig, PerformanceConfig};

pub use loader::{
    default_config_toml, directory_ancestors, load_config, load_config_from,
    load_config_from_path, parse_config, CONFIG_FILE_NAME,
};
