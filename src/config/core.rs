use crate::io::output::OutputFormat;
use serde::{Deserialize, Serialize};

/// Root configuration structure for msapriori
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinerConfig {
    /// Report configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Thread pool and parallel evaluation
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Log filter used when neither RUST_LOG nor -v is given
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerformanceConfig {
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker threads, 0 for one per core
    #[serde(default)]
    pub jobs: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            jobs: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}
