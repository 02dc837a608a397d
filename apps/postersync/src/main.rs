//! postersync entry point.

mod cli;
mod commands;
mod config;
mod plex_library;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // Initialize structured logging.
    let default_filter = if args.verbose {
        "info,postersync=debug,postersync_posters=debug,postersync_plex=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting postersync");

    let mut config = config::Config::load(args.config.as_deref())?;
    config.apply_args(&args);
    config.validate()?;

    let command = args.command.unwrap_or_default();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(commands::run(&config, command))
}
