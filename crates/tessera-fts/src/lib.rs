//! Shard discovery and single-shard full-text search for Tessera.
//!
//! Each content collection is indexed into its own Tantivy index ("shard").
//! This crate finds the shards under an index root and searches one shard at a
//! time; fanning a query out over all of them lives in `tessera-search`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      tessera-fts                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  list_shards       (table-of-contents marker discovery)     │
//! │  ShardSearcher     (open → parse → search → ResultRecord)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ShardSchema       (six-field schema, en_stem tokenizer)    │
//! │  ShardDescriptor / ShardQuery / ResultRecord                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ShardWriter       (fixture writer: index + .toc marker)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use tessera_fts::{list_shards, ShardQuery, ShardSearcher};
//!
//! let searcher = ShardSearcher::new();
//! for shard in list_shards(&index_root)? {
//!     let hits = searcher.search(&shard, &ShardQuery::new("fractions"))?;
//!     println!("{}: {} hit(s)", shard.name, hits.len());
//! }
//! ```

pub mod discovery;
pub mod document;
pub mod schema;
pub mod searcher;
pub mod types;
pub mod writer;

pub use discovery::{list_shards, marker_file_name, shard_name_from_marker};
pub use document::ShardDocument;
pub use schema::ShardSchema;
pub use searcher::ShardSearcher;
pub use types::{ResultRecord, ShardDescriptor, ShardQuery};
pub use writer::ShardWriter;
