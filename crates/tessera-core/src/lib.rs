//! Tessera Core: shared error taxonomy for federated shard search.
//!
//! This crate has no internal Tessera dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias

pub mod error;

pub use error::{Error, Result};
