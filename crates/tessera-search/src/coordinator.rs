//! Federated search coordination.
//!
//! [`SearchCoordinator::search`] validates the query, discovers the shards
//! under an index root, runs one shard search per shard on the
//! [`WorkerPool`], and merges whatever comes back:
//!
//! ```text
//! query ─► validate ─► list_shards ─► pool: shard₀ … shardₙ ─► ResultMerger ─► SearchOutcome
//! ```
//!
//! Shard tasks complete in any order. Their result lists are re-slotted by
//! discovery index before merging, so ties are broken by discovery order.
//! A failed, panicked, or late shard is recorded in
//! [`SearchOutcome::failures`] and never aborts its siblings. Only an invalid
//! query or an unreadable index root fails the whole search.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tessera_core::{Error, Result};
use tessera_fts::{list_shards, ResultRecord, ShardDescriptor, ShardQuery, ShardSearcher};
use tokio::time::Instant;

use crate::backend::ShardBackend;
use crate::config::SearchConfig;
use crate::merge::ResultMerger;
use crate::outcome::{SearchOutcome, ShardFailure};
use crate::pool::WorkerPool;

/// Fans a query out over every shard of an index root.
#[derive(Clone)]
pub struct SearchCoordinator {
    pool: WorkerPool,
    backend: Arc<dyn ShardBackend>,
    timeout: Option<Duration>,
}

impl SearchCoordinator {
    /// Create a coordinator over the Tantivy backend.
    ///
    /// The deadline defaults to [`SearchConfig::default`]'s (30 s); use
    /// [`with_timeout`](Self::with_timeout) to change or remove it.
    pub fn new(pool: WorkerPool) -> Self {
        Self {
            pool,
            backend: Arc::new(ShardSearcher::new()),
            timeout: SearchConfig::default().timeout(),
        }
    }

    /// Create a coordinator sized and timed from configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(WorkerPool::new(config.workers)).with_timeout(config.timeout())
    }

    /// Replace the shard backend.
    pub fn with_backend(mut self, backend: Arc<dyn ShardBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Bound the wall-clock time of one search; `None` waits for every shard.
    ///
    /// Shards still running at the deadline are reported as timed out and
    /// their late results are discarded.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The worker pool shard searches run on.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Search every shard for a free-text query over the default fields.
    pub async fn search_query(&self, index_root: &Path, query: &str) -> Result<SearchOutcome> {
        self.search(index_root, &ShardQuery::new(query)).await
    }

    /// Search every shard under `index_root`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidQuery`] if the query is empty after trimming; the
    ///   filesystem is not touched.
    /// - [`Error::Io`] if the index root cannot be listed.
    ///
    /// Per-shard failures are returned inside the outcome, not as errors.
    pub async fn search(&self, index_root: &Path, query: &ShardQuery) -> Result<SearchOutcome> {
        if query.query.trim().is_empty() {
            return Err(Error::invalid_query("query is empty"));
        }

        let shards = self.discover(index_root).await?;
        if shards.is_empty() {
            log::info!("No shards under {}", index_root.display());
            return Ok(SearchOutcome::empty());
        }

        let started = Instant::now();
        let deadline = self.timeout.map(|timeout| started + timeout);
        let query = Arc::new(query.clone());

        let mut pending = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(shards.len());
        for (index, shard) in shards.iter().enumerate() {
            let backend = Arc::clone(&self.backend);
            let query = Arc::clone(&query);
            let shard = shard.clone();
            let handle = self
                .pool
                .spawn(move || backend.search_shard(&shard, &query));
            abort_handles.push(handle.abort_handle());
            pending.push(async move { (index, handle.await) });
        }

        let mut slots: Vec<Option<Vec<ResultRecord>>> = vec![None; shards.len()];
        let mut finished = vec![false; shards.len()];
        let mut failures: Vec<(usize, ShardFailure)> = Vec::new();

        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, pending.next()).await {
                    Ok(next) => next,
                    Err(_elapsed) => break,
                },
                None => pending.next().await,
            };
            let Some((index, joined)) = next else {
                break;
            };

            finished[index] = true;
            let name = &shards[index].name;
            match joined {
                Ok(Ok(records)) => slots[index] = Some(records),
                Ok(Err(e)) => {
                    if e.is_shard_local() {
                        log::warn!("Shard '{name}' excluded: {e}");
                    } else {
                        log::error!("Shard '{name}' excluded by unexpected error: {e}");
                    }
                    failures.push((index, ShardFailure::from_error(name, &e)));
                }
                Err(e) if e.is_panic() => {
                    log::error!("Shard '{name}' worker panicked");
                    failures.push((index, ShardFailure::panicked(name)));
                }
                Err(e) => {
                    log::error!("Shard '{name}' worker failed: {e}");
                    failures.push((index, ShardFailure::worker(name, e.to_string())));
                }
            }
        }

        if let Some(timeout) = self.timeout {
            let late = Error::Timeout {
                millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
            for (index, shard) in shards.iter().enumerate() {
                if !finished[index] {
                    log::warn!("Shard '{}' excluded: {late}", shard.name);
                    abort_handles[index].abort();
                    failures.push((index, ShardFailure::from_error(&shard.name, &late)));
                }
            }
        }
        drop(pending);

        let mut merger = ResultMerger::new();
        for records in slots.into_iter().flatten() {
            merger.extend(records);
        }
        let duplicates = merger.duplicates();
        let merged = merger.finish();

        failures.sort_by_key(|(index, _)| *index);
        let failures: Vec<ShardFailure> = failures.into_iter().map(|(_, f)| f).collect();

        log::info!(
            "Searched {} shard(s) in {:?}: {} result(s), {} duplicate(s) dropped, {} failure(s)",
            shards.len(),
            started.elapsed(),
            merged.records.len(),
            duplicates,
            failures.len()
        );

        Ok(SearchOutcome {
            results: merged.records,
            failures,
            violations: merged.violations,
            shards_searched: shards.len(),
        })
    }

    /// List shards on a worker; directory reads block.
    async fn discover(&self, index_root: &Path) -> Result<Vec<ShardDescriptor>> {
        let root = index_root.to_path_buf();
        match self.pool.spawn(move || list_shards(&root)).await {
            Ok(listed) => listed,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(Error::io_with_path(std::io::Error::other(e), index_root)),
        }
    }
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new(WorkerPool::default())
    }
}

impl std::fmt::Debug for SearchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCoordinator")
            .field("pool", &self.pool)
            .field("backend", &self.backend.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
