use crate::cli::setup::{configure_thread_pool, get_worker_count, init_logging};
use crate::config::{load_config, load_config_from_path, MinerConfig};
use crate::core::MiningOutcome;
use crate::io::output::{create_writer, OutputFormat};
use crate::io::{load_parameters, load_transactions};
use crate::mining::{Miner, MiningOptions};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of the `mine` subcommand.
#[derive(Debug, Clone)]
pub struct MineConfig {
    pub data: PathBuf,
    pub params: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub no_parallel: bool,
    pub verbosity: u8,
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub format: OutputFormat,
    pub parallel: bool,
    pub jobs: usize,
    pub log_level: String,
}

pub fn resolve_settings(args: &MineConfig, file: &MinerConfig) -> RunSettings {
    RunSettings {
        format: args.format.unwrap_or(file.output.format),
        parallel: !args.no_parallel && file.performance.parallel,
        jobs: args.jobs.unwrap_or(file.performance.jobs),
        log_level: file.logging.level.clone(),
    }
}

pub fn handle_mine_command(args: MineConfig) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };
    let settings = resolve_settings(&args, &file_config);

    init_logging(args.verbosity, &settings.log_level)?;
    if settings.parallel {
        configure_thread_pool(settings.jobs);
        info!(workers = get_worker_count(settings.jobs), "Parallel evaluation enabled");
    }

    let store = load_transactions(&args.data)
        .with_context(|| format!("Failed to load transactions from {}", args.data.display()))?;
    let params = load_parameters(&args.params)
        .with_context(|| format!("Failed to load parameters from {}", args.params.display()))?;

    let outcome = Miner::new(&store, &params)
        .with_options(MiningOptions {
            parallel: settings.parallel,
        })
        .run();

    write_outcome(&outcome, settings.format, args.output.as_deref())?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), "Results written");
    }
    Ok(())
}

/// Render `outcome` to `output`, or stdout when no path is given.
pub fn write_outcome(
    outcome: &MiningOutcome,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };
    create_writer(format, sink).write_results(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, PerformanceConfig};

    fn args() -> MineConfig {
        MineConfig {
            data: PathBuf::from("data.txt"),
            params: PathBuf::from("para.txt"),
            output: None,
            format: None,
            config: None,
            jobs: None,
            no_parallel: false,
            verbosity: 0,
        }
    }

    #[test]
    fn config_file_supplies_defaults() {
        let file = MinerConfig {
            output: OutputConfig {
                format: OutputFormat::Json,
            },
            performance: PerformanceConfig {
                parallel: false,
                jobs: 3,
            },
            ..MinerConfig::default()
        };
        let settings = resolve_settings(&args(), &file);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(!settings.parallel);
        assert_eq!(settings.jobs, 3);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn cli_flags_override_config_file() {
        let cli = MineConfig {
            format: Some(OutputFormat::Terminal),
            jobs: Some(1),
            no_parallel: true,
            ..args()
        };
        let settings = resolve_settings(&cli, &MinerConfig::default());
        assert_eq!(settings.format, OutputFormat::Terminal);
        assert!(!settings.parallel);
        assert_eq!(settings.jobs, 1);
    }
}
