//! Common test utilities for federated search integration tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use tempfile::TempDir;
use tessera_core::{Error, Result};
use tessera_fts::{
    marker_file_name, ResultRecord, ShardDescriptor, ShardDocument, ShardQuery, ShardWriter,
};
use tessera_search::ShardBackend;

/// What a [`CannedBackend`] does when asked to search a shard.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return these records.
    Records(Vec<ResultRecord>),
    /// Sleep, then return these records.
    Slow(Duration, Vec<ResultRecord>),
    /// Fail as if the shard index were corrupt.
    OpenError,
    /// Panic inside the worker.
    Panic,
}

/// Backend returning canned replies keyed by shard name.
///
/// Records the order in which shards were searched.
#[derive(Debug, Default)]
pub struct CannedBackend {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl CannedBackend {
    /// Create a backend with no replies; unknown shards return no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the reply for a shard.
    pub fn reply(mut self, shard: &str, reply: Reply) -> Self {
        self.replies.insert(shard.to_string(), reply);
        self
    }

    /// Shards searched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ShardBackend for CannedBackend {
    fn search_shard(
        &self,
        shard: &ShardDescriptor,
        _query: &ShardQuery,
    ) -> Result<Vec<ResultRecord>> {
        self.calls.lock().unwrap().push(shard.name.clone());
        let stamp = |records: &[ResultRecord]| -> Vec<ResultRecord> {
            records
                .iter()
                .cloned()
                .map(|mut r| {
                    r.shard = shard.name.clone();
                    r
                })
                .collect()
        };

        match self.replies.get(&shard.name) {
            None => Ok(Vec::new()),
            Some(Reply::Records(records)) => Ok(stamp(records)),
            Some(Reply::Slow(delay, records)) => {
                std::thread::sleep(*delay);
                Ok(stamp(records))
            }
            Some(Reply::OpenError) => Err(Error::shard_open(&shard.name, "corrupt segment")),
            Some(Reply::Panic) => panic!("backend exploded on '{}'", shard.name),
        }
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// A record with an id and a score.
pub fn hit(node_id: &str, score: f64) -> ResultRecord {
    ResultRecord {
        node_id: Some(node_id.to_string()),
        score,
        ..Default::default()
    }
}

/// An index root with one marker per shard name and no index data.
pub fn marker_root(shards: &[&str]) -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    for name in shards {
        touch_marker(temp.path(), name, 1);
    }
    temp
}

/// Write an empty table-of-contents marker.
pub fn touch_marker(root: &Path, name: &str, generation: u64) {
    std::fs::write(root.join(marker_file_name(name, generation)), b"").unwrap();
}

/// Write a real Tantivy shard with the given documents.
pub fn write_shard(root: &Path, name: &str, docs: &[ShardDocument]) {
    let mut writer = ShardWriter::create(root, name).unwrap();
    for doc in docs {
        writer.add_document(doc).unwrap();
    }
    writer.commit().unwrap();
}

/// Node ids of a result list, `-` for anonymous records.
pub fn ids(records: &[ResultRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.node_id.as_deref().unwrap_or("-"))
        .collect()
}
