//! Error types for Tessera.
//!
//! Errors fall into two groups:
//!
//! - **Search-level** errors (`InvalidQuery`, `Io`, `Indexing`, `Config`,
//!   `Serialization`) abort the whole operation and are returned to the caller.
//! - **Shard-local** errors (`ShardOpen`, `QueryParse`, `Timeout`) concern a
//!   single shard. The coordinator records them and keeps aggregating results
//!   from the remaining shards.

use std::path::{Path, PathBuf};

/// Errors that can occur while discovering or searching index shards.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The query was empty or whitespace-only.
    #[error("Invalid query: {message}")]
    InvalidQuery {
        /// What is wrong with the query
        message: String,
    },

    /// Filesystem error, typically while listing the index root.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A shard index could not be opened (missing or corrupt).
    #[error("Failed to open shard '{shard}': {message}")]
    ShardOpen {
        /// Logical shard name
        shard: String,
        /// Engine-reported reason
        message: String,
    },

    /// The query is not valid for the shard's query grammar.
    #[error("Failed to parse query for shard '{shard}': {message}")]
    QueryParse {
        /// Logical shard name
        shard: String,
        /// Parser-reported reason
        message: String,
    },

    /// A shard search did not finish before the search deadline.
    #[error("Shard search timed out after {millis}ms")]
    Timeout {
        /// Deadline in milliseconds
        millis: u64,
    },

    /// A shard fixture could not be written.
    #[error("Failed to write shard '{shard}': {message}")]
    Indexing {
        /// Logical shard name
        shard: String,
        /// Engine-reported reason
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error concerns a single shard only.
    ///
    /// Shard-local errors are recovered by the coordinator and never abort
    /// sibling shard searches.
    pub fn is_shard_local(&self) -> bool {
        match self {
            Error::ShardOpen { .. } => true,
            Error::QueryParse { .. } => true,
            Error::Timeout { .. } => true,
            Error::InvalidQuery { .. } => false,
            Error::Io { .. } => false,
            Error::Indexing { .. } => false,
            Error::Config { .. } => false,
            Error::Serialization(_) => false,
        }
    }

    /// Creates a new invalid-query error.
    pub fn invalid_query<S: Into<String>>(message: S) -> Self {
        Error::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates an I/O error tagged with the path being accessed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new shard-open error.
    pub fn shard_open<N, M>(shard: N, message: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Error::ShardOpen {
            shard: shard.into(),
            message: message.into(),
        }
    }

    /// Creates a new query-parse error.
    pub fn query_parse<N, M>(shard: N, message: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Error::QueryParse {
            shard: shard.into(),
            message: message.into(),
        }
    }

    /// Creates a new indexing error.
    pub fn indexing<N, M>(shard: N, message: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Error::Indexing {
            shard: shard.into(),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
