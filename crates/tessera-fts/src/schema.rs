//! Tantivy schema shared by every shard.
//!
//! Each shard indexes one content collection with the same six fields:
//!
//! ## Identity Fields
//! - `node_id`: Content node identifier (STRING | STORED)
//! - `content_id`: Content identifier shared by copies of a node (STRING | STORED)
//!
//! ## Full-Text Fields (searchable with positions for phrase queries)
//! - `title`: Node title (TEXT | STORED)
//! - `description`: Short description (TEXT | STORED)
//! - `tags`: Space-separated tags (TEXT | STORED)
//! - `content`: Body text (TEXT, not stored)
//!
//! # Tokenizer
//!
//! Full-text fields use the English stemming tokenizer (`en_stem`):
//! SimpleTokenizer → LowerCaser → Stemmer(English). It is not built into
//! Tantivy, so [`ShardSchema::register_tokenizers`] must be called on every
//! index handle before parsing queries against it.

use tantivy::schema::{
    Field, IndexRecordOption, Schema, SchemaBuilder, TextFieldIndexing, TextOptions, STORED,
    STRING,
};
use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};
use tantivy::Index;

/// Name of the stemming tokenizer used by full-text fields.
pub const EN_STEM: &str = "en_stem";

/// Content node identifier field.
pub const NODE_ID: &str = "node_id";
/// Content identifier field.
pub const CONTENT_ID: &str = "content_id";
/// Title field.
pub const TITLE: &str = "title";
/// Description field.
pub const DESCRIPTION: &str = "description";
/// Tags field.
pub const TAGS: &str = "tags";
/// Body text field.
pub const CONTENT: &str = "content";

/// Fields an unrestricted query is parsed against.
pub const DEFAULT_SEARCH_FIELDS: [&str; 6] =
    [NODE_ID, CONTENT_ID, TITLE, DESCRIPTION, TAGS, CONTENT];

/// Stored fields copied into each result record.
pub const STORED_RESULT_FIELDS: [&str; 5] = [NODE_ID, CONTENT_ID, TITLE, DESCRIPTION, TAGS];

/// Shard schema holding field references and the Tantivy schema.
#[derive(Clone)]
pub struct ShardSchema {
    schema: Schema,

    /// Content node identifier.
    pub node_id: Field,
    /// Content identifier.
    pub content_id: Field,
    /// Node title.
    pub title: Field,
    /// Short description.
    pub description: Field,
    /// Space-separated tags.
    pub tags: Field,
    /// Body text.
    pub content: Field,
}

impl ShardSchema {
    /// Build the shard schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        let indexing = TextFieldIndexing::default()
            .set_tokenizer(EN_STEM)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);
        let stored_text = TextOptions::default()
            .set_indexing_options(indexing.clone())
            .set_stored();
        let body_text = TextOptions::default().set_indexing_options(indexing);

        let node_id = builder.add_text_field(NODE_ID, STRING | STORED);
        let content_id = builder.add_text_field(CONTENT_ID, STRING | STORED);

        let title = builder.add_text_field(TITLE, stored_text.clone());
        let description = builder.add_text_field(DESCRIPTION, stored_text.clone());
        let tags = builder.add_text_field(TAGS, stored_text);
        let content = builder.add_text_field(CONTENT, body_text);

        Self {
            schema: builder.build(),
            node_id,
            content_id,
            title,
            description,
            tags,
            content,
        }
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register custom tokenizers with a Tantivy index.
    pub fn register_tokenizers(index: &Index) {
        let en_stem = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(Language::English))
            .build();

        index.tokenizers().register(EN_STEM, en_stem);
    }

    /// Get all fields.
    pub fn all_fields(&self) -> Vec<Field> {
        vec![
            self.node_id,
            self.content_id,
            self.title,
            self.description,
            self.tags,
            self.content,
        ]
    }
}

/// Look up an indexed field by name in a shard's own schema.
///
/// Shards are written by an external process, so the reader resolves fields
/// from the schema stored in each index instead of assuming [`ShardSchema`].
pub fn indexed_field(schema: &Schema, name: &str) -> Option<Field> {
    schema
        .get_field(name)
        .ok()
        .filter(|field| schema.get_field_entry(*field).is_indexed())
}

impl std::fmt::Debug for ShardSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardSchema")
            .field("field_count", &self.all_fields().len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
