//! Shard document representation.
//!
//! `ShardDocument` is what [`ShardWriter`](crate::writer::ShardWriter) puts
//! into a shard. Every field is optional except the body, mirroring the
//! stored fields a [`ResultRecord`](crate::types::ResultRecord) carries.
//!
//! ```rust
//! use tessera_fts::ShardDocument;
//!
//! let doc = ShardDocument::builder()
//!     .node_id("n1")
//!     .title("Adding Fractions")
//!     .content("Find a common denominator first.")
//!     .build();
//! assert_eq!(doc.node_id.as_deref(), Some("n1"));
//! ```

use serde::{Deserialize, Serialize};

/// A document to be written into a shard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardDocument {
    /// Content node identifier.
    pub node_id: Option<String>,
    /// Content identifier.
    pub content_id: Option<String>,
    /// Node title.
    pub title: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Space-separated tags.
    pub tags: Option<String>,
    /// Body text (indexed, not stored).
    pub content: String,
}

impl ShardDocument {
    /// Create a new document builder.
    pub fn builder() -> ShardDocumentBuilder {
        ShardDocumentBuilder::default()
    }
}

/// Builder for [`ShardDocument`].
#[derive(Debug, Default)]
pub struct ShardDocumentBuilder {
    doc: ShardDocument,
}

impl ShardDocumentBuilder {
    /// Set the node identifier.
    pub fn node_id(mut self, node_id: impl Into<String>) -> Self {
        self.doc.node_id = Some(node_id.into());
        self
    }

    /// Set the content identifier.
    pub fn content_id(mut self, content_id: impl Into<String>) -> Self {
        self.doc.content_id = Some(content_id.into());
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.doc.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.doc.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.doc.tags = Some(tags.into());
        self
    }

    /// Set the body text.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.doc.content = content.into();
        self
    }

    /// Build the document.
    pub fn build(self) -> ShardDocument {
        self.doc
    }
}
