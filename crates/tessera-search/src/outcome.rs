//! Search outcome types.

use serde::{Deserialize, Serialize};
use tessera_core::Error;
use tessera_fts::ResultRecord;

use crate::merge::IntegrityViolation;

/// Why a shard contributed no results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The shard index could not be opened.
    Open,
    /// The query could not be parsed for this shard.
    QueryParse,
    /// The shard did not finish before the search deadline.
    Timeout,
    /// The worker panicked or failed for another reason.
    Worker,
}

/// A shard excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardFailure {
    /// Logical shard name.
    pub shard: String,
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable reason.
    pub message: String,
}

impl ShardFailure {
    /// Classify an error returned by a shard search.
    pub fn from_error(shard: impl Into<String>, error: &Error) -> Self {
        let kind = match error {
            Error::ShardOpen { .. } => FailureKind::Open,
            Error::QueryParse { .. } => FailureKind::QueryParse,
            Error::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Worker,
        };
        Self {
            shard: shard.into(),
            kind,
            message: error.to_string(),
        }
    }

    /// A worker that did not return normally.
    pub fn worker(shard: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            shard: shard.into(),
            kind: FailureKind::Worker,
            message: message.into(),
        }
    }

    /// A worker that panicked instead of returning.
    pub fn panicked(shard: impl Into<String>) -> Self {
        Self::worker(shard, "Shard worker panicked")
    }
}

/// Result of one federated search.
///
/// A partially failed search still carries every result that could be
/// obtained; `failures` lists the shards that were left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Merged records, score descending.
    pub results: Vec<ResultRecord>,
    /// Shards excluded from aggregation.
    #[serde(default)]
    pub failures: Vec<ShardFailure>,
    /// Integrity signals raised while merging.
    #[serde(default)]
    pub violations: Vec<IntegrityViolation>,
    /// Number of shards discovered and dispatched.
    pub shards_searched: usize,
}

impl SearchOutcome {
    /// Outcome of a search over zero shards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when at least one shard was searched and all of them failed.
    pub fn all_failed(&self) -> bool {
        self.shards_searched > 0 && self.failures.len() == self.shards_searched
    }
}

// ============================================================================
// Tests
// ============================================================================
