//! Search configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tessera_core::{Error, Result};

use crate::pool::DEFAULT_WORKERS;

/// Federated search configuration.
///
/// Every field has a default, so a partial (or empty) config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directory holding every shard and its table-of-contents markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_root: Option<PathBuf>,

    /// Number of shards searched concurrently.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Wall-clock budget for one search in seconds; 0 disables the deadline.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Per-shard hit cap; unset returns every match. Must be at least 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Field queries are restricted to unless the caller names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field: Option<String>,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_timeout_secs() -> u64 {
    30
}

impl SearchConfig {
    /// Search deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Reject values that cannot describe a useful search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `limit` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(Error::config("`limit` must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_root: None,
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            limit: None,
            default_field: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
