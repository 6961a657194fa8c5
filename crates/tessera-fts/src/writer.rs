//! Shard fixture writer.
//!
//! Shards are normally produced by an external indexing process. `ShardWriter`
//! writes shards in the same on-disk layout so that tests and local tooling can
//! build an index root without that process:
//!
//! ```rust,ignore
//! use tessera_fts::{ShardDocument, ShardWriter};
//!
//! let mut writer = ShardWriter::create(&index_root, "channel-a")?;
//! writer.add_document(&ShardDocument::builder().node_id("n1").title("Fractions").build())?;
//! writer.commit()?; // writes _channel-a_<generation>.toc
//! ```

use std::path::{Path, PathBuf};

use tantivy::schema::Field;
use tantivy::{Index, IndexWriter, TantivyDocument};
use tessera_core::{Error, Result};

use crate::discovery::marker_file_name;
use crate::document::ShardDocument;
use crate::schema::ShardSchema;

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// Writes one shard and its table-of-contents markers.
pub struct ShardWriter {
    name: String,
    index_root: PathBuf,
    writer: IndexWriter,
    schema: ShardSchema,
}

impl ShardWriter {
    /// Create or open the shard `name` under `index_root`.
    ///
    /// The index lives in `<index_root>/<name>/`; an existing index there is
    /// opened and appended to.
    pub fn create(index_root: &Path, name: &str) -> Result<Self> {
        let schema = ShardSchema::build();
        let shard_path = index_root.join(name);

        if !shard_path.exists() {
            std::fs::create_dir_all(&shard_path).map_err(|e| Error::io_with_path(e, &shard_path))?;
        }

        let index = if shard_path.join("meta.json").exists() {
            Index::open_in_dir(&shard_path)
                .map_err(|e| Error::indexing(name, format!("Failed to open index: {e}")))?
        } else {
            Index::create_in_dir(&shard_path, schema.schema().clone())
                .map_err(|e| Error::indexing(name, format!("Failed to create index: {e}")))?
        };

        ShardSchema::register_tokenizers(&index);

        let writer = index
            .writer_with_num_threads(1, WRITER_BUFFER_SIZE)
            .map_err(|e| Error::indexing(name, format!("Failed to create index writer: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            index_root: index_root.to_path_buf(),
            writer,
            schema,
        })
    }

    /// Stage a document; it becomes searchable after [`commit`](Self::commit).
    pub fn add_document(&mut self, doc: &ShardDocument) -> Result<()> {
        let tantivy_doc = self.convert_to_tantivy_doc(doc);
        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| Error::indexing(&self.name, format!("Failed to add document: {e}")))?;
        Ok(())
    }

    /// Commit staged documents and write the marker for the new generation.
    ///
    /// Returns the generation number (the commit opstamp).
    pub fn commit(&mut self) -> Result<u64> {
        let generation = self
            .writer
            .commit()
            .map_err(|e| Error::indexing(&self.name, format!("Failed to commit index: {e}")))?;

        let marker = self
            .index_root
            .join(marker_file_name(&self.name, generation));
        std::fs::write(&marker, b"").map_err(|e| Error::io_with_path(e, &marker))?;

        log::debug!("Committed shard '{}' generation {generation}", self.name);
        Ok(generation)
    }

    /// Logical shard name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn convert_to_tantivy_doc(&self, doc: &ShardDocument) -> TantivyDocument {
        let s = &self.schema;
        let mut tantivy_doc = TantivyDocument::new();

        add_optional(&mut tantivy_doc, s.node_id, &doc.node_id);
        add_optional(&mut tantivy_doc, s.content_id, &doc.content_id);
        add_optional(&mut tantivy_doc, s.title, &doc.title);
        add_optional(&mut tantivy_doc, s.description, &doc.description);
        add_optional(&mut tantivy_doc, s.tags, &doc.tags);
        tantivy_doc.add_text(s.content, &doc.content);

        tantivy_doc
    }
}

fn add_optional(doc: &mut TantivyDocument, field: Field, value: &Option<String>) {
    if let Some(value) = value {
        doc.add_text(field, value);
    }
}

impl std::fmt::Debug for ShardWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardWriter")
            .field("name", &self.name)
            .field("index_root", &self.index_root)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
