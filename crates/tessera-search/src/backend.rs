//! Shard search backend seam.
//!
//! The coordinator runs a [`ShardBackend`] once per shard on a worker
//! thread. [`ShardSearcher`] is the Tantivy implementation; tests substitute
//! backends with canned results.

use tessera_core::Result;
use tessera_fts::{ResultRecord, ShardDescriptor, ShardQuery, ShardSearcher};

/// Searches a single shard synchronously.
///
/// Implementations must not share index handles between calls running on
/// different workers.
pub trait ShardBackend: Send + Sync + 'static {
    /// Search one shard.
    fn search_shard(&self, shard: &ShardDescriptor, query: &ShardQuery)
        -> Result<Vec<ResultRecord>>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

impl ShardBackend for ShardSearcher {
    fn search_shard(
        &self,
        shard: &ShardDescriptor,
        query: &ShardQuery,
    ) -> Result<Vec<ResultRecord>> {
        self.search(shard, query)
    }

    fn name(&self) -> &str {
        "tantivy"
    }
}
