//! Shard discovery.
//!
//! An index root holds one table-of-contents marker per shard generation,
//! named `_<name>_<generation>.toc`, next to the shard's Tantivy index
//! directory `<name>/`:
//!
//! ```text
//! index_root/
//! ├── _channel-a_1.toc
//! ├── _channel-a_2.toc
//! ├── _channel-b_1.toc
//! ├── channel-a/        (meta.json + segments)
//! └── channel-b/
//! ```
//!
//! Discovery only lists the root; it never opens an index.

use std::collections::HashSet;
use std::path::Path;

use tessera_core::{Error, Result};

use crate::types::ShardDescriptor;

/// Leading decoration of a marker file name.
pub const TOC_PREFIX: &str = "_";

/// Trailing decoration of a marker file name.
pub const TOC_SUFFIX: &str = ".toc";

/// File name of the table-of-contents marker for one shard generation.
pub fn marker_file_name(name: &str, generation: u64) -> String {
    format!("{TOC_PREFIX}{name}_{generation}{TOC_SUFFIX}")
}

/// Derive a shard's logical name from its marker file name.
///
/// Strips the `_` prefix, the `.toc` suffix, and the generation suffix
/// (trailing digits and underscores). Returns `None` for anything that is not
/// a marker or that reduces to an empty name.
pub fn shard_name_from_marker(file_name: &str) -> Option<&str> {
    let stem = file_name
        .strip_prefix(TOC_PREFIX)?
        .strip_suffix(TOC_SUFFIX)?;
    let name = stem
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_end_matches('_');

    (!name.is_empty()).then_some(name)
}

/// List the shards available under `index_root`.
///
/// Shards are returned in lexicographic marker order, one descriptor per
/// logical name regardless of how many generations exist.
///
/// # Errors
///
/// Returns [`Error::Io`] if `index_root` does not exist, is not a directory,
/// or cannot be read. An empty directory yields an empty list.
pub fn list_shards(index_root: &Path) -> Result<Vec<ShardDescriptor>> {
    let entries = std::fs::read_dir(index_root).map_err(|e| Error::io_with_path(e, index_root))?;

    let mut markers = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_with_path(e, index_root))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if !file_name.ends_with(TOC_SUFFIX) {
            continue;
        }
        let is_file = entry
            .file_type()
            .map_err(|e| Error::io_with_path(e, entry.path()))?
            .is_file();
        if is_file {
            markers.push(file_name.to_string());
        }
    }
    markers.sort();

    let mut seen = HashSet::new();
    let mut shards = Vec::new();
    for marker in &markers {
        let Some(name) = shard_name_from_marker(marker) else {
            log::warn!("Ignoring malformed shard marker '{marker}'");
            continue;
        };
        if seen.insert(name.to_string()) {
            shards.push(ShardDescriptor::new(name, index_root.join(name)));
        }
    }

    log::debug!(
        "Discovered {} shard(s) from {} marker(s) under {}",
        shards.len(),
        markers.len(),
        index_root.display()
    );

    Ok(shards)
}

// ============================================================================
// Tests
// ============================================================================
