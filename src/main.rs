use clap::Parser;

use stakesim::cli::{ladder, ledger, simulate, Cli, Commands};
use stakesim::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    config.init_logging();

    match &cli.command {
        Commands::Simulate(args) => simulate::execute(args, &config)?,
        Commands::Ladder(args) => ladder::execute(args, &config)?,
        Commands::Ledger(command) => ledger::execute(command, &config)?,
    }
    Ok(())
}
