mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    skillmatch_logging::init_logging(&config.logging.level, config.logging.format)?;

    commands::run(cli, &config)
}
