//! Command-line argument definitions.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

/// Tessera - federated full-text search over index shards
#[derive(Parser, Debug)]
#[command(name = "tessera", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TESSERA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search every shard under the index root
    Search(SearchArgs),

    /// List the shards discovered under the index root
    Shards {
        /// Index root directory (overrides `index_root` in the config file)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `tessera search`.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Query text
    pub query: String,

    /// Index root directory (overrides `index_root` in the config file)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Restrict the query to a single field
    #[arg(short, long)]
    pub field: Option<String>,

    /// Maximum hits per shard (at least 1)
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub limit: Option<usize>,

    /// Number of shards searched concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Search deadline in seconds (0 disables it)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// `tessera config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a configuration value by dotted key
    Get {
        /// Key, e.g. `workers`
        key: String,
    },

    /// Set a configuration value by dotted key
    Set {
        /// Key, e.g. `timeout_secs`
        key: String,
        /// New value
        value: String,
    },

    /// Write a default configuration file
    Init {
        /// Write to this path instead of the default location
        #[arg(long)]
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
