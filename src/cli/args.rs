use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "msapriori")]
#[command(about = "Frequent itemset mining with per-item minimum supports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mine frequent itemsets from a transaction file
    Mine {
        /// Transaction file, one comma-separated transaction per line
        data: PathBuf,

        /// Parameter file with MIS, Price, SDC and AVPT entries (line format or .toml)
        params: PathBuf,

        /// Report file (defaults to stdout)
        output: Option<PathBuf>,

        /// Report format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Config file to use instead of searching for .msapriori.toml
        #[arg(long, env = "MSAPRIORI_CONFIG")]
        config: Option<PathBuf>,

        /// Number of worker threads (0 = one per core)
        #[arg(short = 'j', long = "jobs")]
        jobs: Option<usize>,

        /// Evaluate candidates on the calling thread only
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .msapriori.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
