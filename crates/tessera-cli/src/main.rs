//! Tessera CLI
//!
//! Command-line interface for federated search over index shards.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;
mod config_handlers;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so search output stays pipeable
    let default_filter = if cli.verbose {
        "info,tessera=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Search(args) => {
            let outcome = commands::cmd_search(config_path, args).await?;
            if outcome.all_failed() {
                anyhow::bail!("all {} shard(s) failed", outcome.shards_searched);
            }
        }
        Command::Shards { root } => commands::cmd_shards(config_path, root.as_deref())?,
        Command::Config { action } => config_handlers::handle_config_command(config_path, action)?,
    }

    Ok(())
}
