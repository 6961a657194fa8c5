//! `search` and `shards` command handlers.

use std::fmt::Write as _;
use std::path::Path;

use tessera_core::Result;
use tessera_fts::{list_shards, ShardDescriptor, ShardQuery};
use tessera_search::{SearchConfig, SearchCoordinator, SearchOutcome};

use crate::cli::SearchArgs;
use crate::config::{apply_overrides, load_config, require_index_root};

/// Run a federated search and print the outcome.
pub async fn cmd_search(config_path: Option<&Path>, args: SearchArgs) -> Result<SearchOutcome> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);
    let outcome = run_search(&config, &args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_outcome(&outcome));
    }
    for failure in &outcome.failures {
        eprintln!("warning: shard '{}' skipped: {}", failure.shard, failure.message);
    }
    for violation in &outcome.violations {
        eprintln!(
            "warning: untitled duplicate of node '{}' ('{}') in shard '{}'",
            violation.conflicting_node_id, violation.title, violation.shard
        );
    }
    Ok(outcome)
}

/// Search the configured index root.
pub async fn run_search(config: &SearchConfig, query: &str) -> Result<SearchOutcome> {
    config.validate()?;
    let root = require_index_root(config)?;

    let mut shard_query = ShardQuery::new(query);
    if let Some(field) = &config.default_field {
        shard_query = shard_query.with_field(field.clone());
    }
    if let Some(limit) = config.limit {
        shard_query = shard_query.with_limit(limit);
    }

    tracing::debug!(root = %root.display(), query, workers = config.workers, "Searching");
    SearchCoordinator::from_config(config)
        .search(root, &shard_query)
        .await
}

/// List discovered shards.
pub fn cmd_shards(config_path: Option<&Path>, root: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let root = match root {
        Some(root) => root,
        None => require_index_root(&config)?,
    };
    let shards = list_shards(root)?;
    print!("{}", render_shards(&shards));
    Ok(())
}

/// One line per result: rank, score, title, node id and shard.
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    if outcome.results.is_empty() {
        let _ = writeln!(out, "No results ({} shard(s) searched)", outcome.shards_searched);
        return out;
    }
    for (rank, record) in outcome.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:>8.3}  {}  [{}] ({})",
            rank + 1,
            record.score,
            record.title.as_deref().unwrap_or("(untitled)"),
            record.node_id.as_deref().unwrap_or("-"),
            record.shard
        );
    }
    out
}

/// One line per shard: name and index directory.
pub fn render_shards(shards: &[ShardDescriptor]) -> String {
    let mut out = String::new();
    for shard in shards {
        let _ = writeln!(out, "{}\t{}", shard.name, shard.path.display());
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
