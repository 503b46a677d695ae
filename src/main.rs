use anyhow::Result;
use msapriori::cli::{self, Commands, MineConfig};

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Mine {
            data,
            params,
            output,
            format,
            config,
            jobs,
            no_parallel,
            verbosity,
        } => cli::handle_mine_command(MineConfig {
            data,
            params,
            output,
            format,
            config,
            jobs,
            no_parallel,
            verbosity,
        }),
        Commands::Init { force } => cli::handle_init_command(force),
    }
}
