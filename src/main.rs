mod application;
mod cli;
mod cli_handlers;
mod config;
mod core;
mod logging;
mod modules;
mod utils;

use clap::Parser;
use cli::Cli;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    cli_handlers::from_cli(cli.command, config).execute()
}
