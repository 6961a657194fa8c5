//! Bounded worker pool for blocking shard searches.
//!
//! Shard searches do synchronous index I/O, so each task runs on Tokio's
//! blocking thread pool. A semaphore caps how many run at once; the rest wait
//! for a permit in submission order.
//!
//! The pool is an explicit value handed to the coordinator, not a global. A
//! pool of size 1 runs shards strictly one after another.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Default number of concurrent shard searches.
pub const DEFAULT_WORKERS: usize = 5;

/// Fixed-size pool of blocking workers.
///
/// Cheap to clone; clones share the same permits.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool running at most `size` tasks at once (minimum 1).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Maximum number of concurrently running tasks.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of workers currently idle.
    pub fn idle(&self) -> usize {
        self.permits.available_permits()
    }

    /// Submit a blocking task.
    ///
    /// The task starts once a worker is free. The permit travels with the
    /// blocking closure, so aborting the returned handle never frees a worker
    /// that is still busy. A panic inside `task` surfaces as a panicked
    /// [`JoinError`](tokio::task::JoinError) on the handle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F, T>(&self, task: F) -> JoinHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails if that
            // invariant is broken; run unthrottled rather than drop the task.
            let permit = permits.acquire_owned().await.ok();
            let blocking = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                task()
            });
            match blocking.await {
                Ok(value) => value,
                Err(e) => std::panic::resume_unwind(e.into_panic()),
            }
        })
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size)
            .field("idle", &self.idle())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
