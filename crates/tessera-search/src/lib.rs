//! Parallel fan-out search across Tessera index shards.
//!
//! This crate turns the single-shard primitives of `tessera-fts` into one
//! federated search:
//!
//! - [`WorkerPool`]: fixed-size pool of blocking workers (default 5)
//! - [`SearchCoordinator`]: discovery, dispatch, partial-failure collection
//! - [`ResultMerger`]: identity deduplication and global ranking
//! - [`SearchOutcome`]: ranked results plus per-shard failures and integrity
//!   violations
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_search::{SearchCoordinator, WorkerPool};
//!
//! let coordinator = SearchCoordinator::new(WorkerPool::new(5));
//! let outcome = coordinator.search_query(&index_root, "adding fractions").await?;
//!
//! for record in &outcome.results {
//!     println!("{:.3} {:?} ({})", record.score, record.title, record.shard);
//! }
//! for failure in &outcome.failures {
//!     eprintln!("skipped {}: {}", failure.shard, failure.message);
//! }
//! ```

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod merge;
pub mod outcome;
pub mod pool;

mod proptests;

pub use backend::ShardBackend;
pub use config::SearchConfig;
pub use coordinator::SearchCoordinator;
pub use merge::{IntegrityViolation, MergedResults, ResultMerger};
pub use outcome::{FailureKind, SearchOutcome, ShardFailure};
pub use pool::{WorkerPool, DEFAULT_WORKERS};
