//! Common types for shard search.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One on-disk index shard.
///
/// Created fresh by discovery on every search; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardDescriptor {
    /// Logical shard name (derived from its table-of-contents marker).
    pub name: String,
    /// Tantivy index directory of the shard.
    pub path: PathBuf,
}

impl ShardDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Query parameters sent to every shard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardQuery {
    /// Free-text query string.
    pub query: String,

    /// Restrict parsing to a single field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Per-shard result cap; `None` returns every match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ShardQuery {
    /// Create an unrestricted, uncapped query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Restrict the query to one field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Cap the number of hits returned per shard.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A single hit from one shard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Content node identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    /// Content identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,

    /// Node title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Space-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    /// Query terms present in this hit.
    #[serde(default)]
    pub matched_terms: BTreeSet<String>,

    /// Shard-local relevance score (higher is better).
    pub score: f64,

    /// Name of the shard that produced the hit.
    pub shard: String,
}

impl ResultRecord {
    /// The node identifier, if present and non-empty.
    pub fn identity(&self) -> Option<&str> {
        self.node_id.as_deref().filter(|id| !id.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
