//! Cross-shard result merging.
//!
//! [`ResultMerger`] consumes records in accumulation order and enforces the
//! identity invariant: no two merged records share a non-empty `node_id`.
//! The first record seen for an id wins; later copies are dropped.
//!
//! Records without a `node_id` are never deduplicated. When such a record has
//! the same title as a surviving identified record, the merger reports an
//! [`IntegrityViolation`] and keeps the record.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tessera_fts::ResultRecord;

/// An anonymous record whose title collides with an identified record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityViolation {
    /// The shared title.
    pub title: String,
    /// Shard that produced the anonymous record.
    pub shard: String,
    /// Node id of the identified record carrying the same title.
    pub conflicting_node_id: String,
}

/// Output of a merge: ranked records plus integrity signals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedResults {
    /// Deduplicated records, score descending, stable on ties.
    pub records: Vec<ResultRecord>,
    /// Title collisions between anonymous and identified records.
    pub violations: Vec<IntegrityViolation>,
}

/// Streaming merger.
#[derive(Debug, Default)]
pub struct ResultMerger {
    seen_ids: HashSet<String>,
    identified_titles: HashMap<String, String>,
    records: Vec<ResultRecord>,
    duplicates: usize,
}

impl ResultMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a complete list in one call.
    pub fn merge(records: impl IntoIterator<Item = ResultRecord>) -> MergedResults {
        let mut merger = Self::new();
        merger.extend(records);
        merger.finish()
    }

    /// Add one record. Returns `false` if it was dropped as a duplicate.
    pub fn push(&mut self, record: ResultRecord) -> bool {
        if let Some(id) = record.identity() {
            if !self.seen_ids.insert(id.to_string()) {
                log::debug!(
                    "Dropping duplicate node '{id}' from shard '{}'",
                    record.shard
                );
                self.duplicates += 1;
                return false;
            }
            if let Some(title) = &record.title {
                self.identified_titles
                    .entry(title.clone())
                    .or_insert_with(|| id.to_string());
            }
        }
        self.records.push(record);
        true
    }

    /// Number of records dropped so far.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Rank the survivors and collect integrity violations.
    pub fn finish(self) -> MergedResults {
        let Self {
            identified_titles,
            mut records,
            ..
        } = self;

        let violations: Vec<IntegrityViolation> = records
            .iter()
            .filter(|record| record.identity().is_none())
            .filter_map(|record| {
                let title = record.title.as_ref()?;
                let node_id = identified_titles.get(title)?;
                Some(IntegrityViolation {
                    title: title.clone(),
                    shard: record.shard.clone(),
                    conflicting_node_id: node_id.clone(),
                })
            })
            .collect();

        for violation in &violations {
            log::warn!(
                "Integrity violation: anonymous record '{}' from shard '{}' shares its title with node '{}'",
                violation.title,
                violation.shard,
                violation.conflicting_node_id
            );
        }

        // sort_by is stable: ties keep accumulation order
        records.sort_by(|a, b| b.score.total_cmp(&a.score));

        MergedResults {
            records,
            violations,
        }
    }
}

impl Extend<ResultRecord> for ResultMerger {
    fn extend<I: IntoIterator<Item = ResultRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
