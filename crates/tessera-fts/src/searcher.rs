//! Single-shard search.
//!
//! [`ShardSearcher`] opens one shard read-only, parses the query, runs it, and
//! turns every hit into a [`ResultRecord`]. The index handle and reader live
//! only for the duration of [`ShardSearcher::search`], so they are released on
//! every exit path and never shared between threads.
//!
//! # Query semantics
//!
//! Without a field restriction the query is parsed against
//! [`DEFAULT_SEARCH_FIELDS`]: every term must match (AND), and each term may
//! match in any of the fields (OR). With a restriction only that field is
//! searched.

use std::collections::BTreeSet;

use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value};
use tantivy::{
    DocAddress, DocSet, Index, IndexReader, ReloadPolicy, Searcher, TantivyDocument, Term,
};
use tessera_core::{Error, Result};

use crate::schema::{
    indexed_field, ShardSchema, CONTENT_ID, DEFAULT_SEARCH_FIELDS, DESCRIPTION, NODE_ID, TAGS,
    TITLE,
};
use crate::types::{ResultRecord, ShardDescriptor, ShardQuery};

/// Searches one shard at a time.
///
/// Holds no index state, so one instance can be shared by every worker.
#[derive(Debug, Clone)]
pub struct ShardSearcher {
    default_fields: Vec<String>,
}

impl Default for ShardSearcher {
    fn default() -> Self {
        Self {
            default_fields: DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl ShardSearcher {
    /// Create a searcher using the default field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the fields an unrestricted query is parsed against.
    pub fn with_default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Search a single shard.
    ///
    /// Hits come back in the engine's score order. A `limit` of 0 returns no
    /// hits once the query has been validated.
    ///
    /// # Errors
    ///
    /// - [`Error::ShardOpen`] if the shard is missing or corrupt.
    /// - [`Error::QueryParse`] if the query is invalid, or names a field the
    ///   shard does not index.
    pub fn search(
        &self,
        shard: &ShardDescriptor,
        query: &ShardQuery,
    ) -> Result<Vec<ResultRecord>> {
        let index = open_shard(shard)?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::shard_open(&shard.name, format!("Failed to create reader: {e}")))?;
        let searcher = reader.searcher();
        let schema = index.schema();

        let fields = self.query_fields(&schema, shard, query.field.as_deref())?;
        let mut parser = QueryParser::for_index(&index, fields);
        parser.set_conjunction_by_default();
        let parsed = parser
            .parse_query(query.query.trim())
            .map_err(|e| Error::query_parse(&shard.name, e.to_string()))?;

        let limit = match query.limit {
            Some(0) => return Ok(Vec::new()),
            Some(limit) => limit,
            // the collector needs a non-zero limit even for an empty shard
            None => usize::try_from(searcher.num_docs())
                .unwrap_or(usize::MAX)
                .max(1),
        };
        let top_docs = searcher
            .search(parsed.as_ref(), &TopDocs::with_limit(limit).order_by_score())
            .map_err(|e| Error::shard_open(&shard.name, format!("Search failed: {e}")))?;

        let terms = query_terms(parsed.as_ref());
        let mut records = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| Error::shard_open(&shard.name, format!("Failed to load hit: {e}")))?;

            let mut record = doc_to_record(&doc, &schema, f64::from(score), &shard.name);
            record.matched_terms =
                matched_terms(&searcher, &terms, address).map_err(|e| {
                    Error::shard_open(&shard.name, format!("Failed to read postings: {e}"))
                })?;
            records.push(record);
        }

        log::debug!(
            "Shard '{}': {} hit(s) for {:?} (field: {:?})",
            shard.name,
            records.len(),
            query.query,
            query.field
        );

        Ok(records)
    }

    fn query_fields(
        &self,
        schema: &Schema,
        shard: &ShardDescriptor,
        field: Option<&str>,
    ) -> Result<Vec<Field>> {
        if let Some(name) = field {
            return indexed_field(schema, name).map(|f| vec![f]).ok_or_else(|| {
                Error::query_parse(&shard.name, format!("Field '{name}' is not searchable"))
            });
        }

        let fields: Vec<Field> = self
            .default_fields
            .iter()
            .filter_map(|name| indexed_field(schema, name))
            .collect();
        if fields.is_empty() {
            return Err(Error::query_parse(
                &shard.name,
                "Shard has none of the default search fields",
            ));
        }
        Ok(fields)
    }
}

/// Open a shard's index read-only. No writer lock is taken.
fn open_shard(shard: &ShardDescriptor) -> Result<Index> {
    let index = Index::open_in_dir(&shard.path)
        .map_err(|e| Error::shard_open(&shard.name, e.to_string()))?;
    ShardSchema::register_tokenizers(&index);
    Ok(index)
}

/// A query term with its printable text.
struct QueryTerm {
    term: Term,
    text: String,
}

fn query_terms(query: &dyn Query) -> Vec<QueryTerm> {
    let mut terms = Vec::new();
    query.query_terms(&mut |term: &Term, _needs_positions: bool| {
        if let Some(text) = term.value().as_str() {
            terms.push(QueryTerm {
                term: term.clone(),
                text: text.to_string(),
            });
        }
    });
    terms
}

/// Query terms whose postings contain the hit.
fn matched_terms(
    searcher: &Searcher,
    terms: &[QueryTerm],
    address: DocAddress,
) -> tantivy::Result<BTreeSet<String>> {
    let segment = searcher.segment_reader(address.segment_ord);
    let mut matched = BTreeSet::new();

    for query_term in terms {
        if matched.contains(&query_term.text) {
            continue;
        }
        let inverted = segment.inverted_index(query_term.term.field())?;
        let postings = inverted.read_postings(&query_term.term, IndexRecordOption::Basic)?;
        let Some(mut postings) = postings else {
            continue;
        };
        // seek only moves forward; a fresh cursor may already be past the hit
        let current = postings.doc();
        let contains_hit = current == address.doc_id
            || (current < address.doc_id && postings.seek(address.doc_id) == address.doc_id);
        if contains_hit {
            matched.insert(query_term.text.clone());
        }
    }

    Ok(matched)
}

fn doc_to_record(doc: &TantivyDocument, schema: &Schema, score: f64, shard: &str) -> ResultRecord {
    let text = |name: &str| -> Option<String> {
        let field = schema.get_field(name).ok()?;
        let values: Vec<&str> = doc.get_all(field).filter_map(|v| v.as_str()).collect();
        let joined = values.join(" ");
        (!joined.is_empty()).then_some(joined)
    };

    ResultRecord {
        node_id: text(NODE_ID),
        content_id: text(CONTENT_ID),
        title: text(TITLE),
        description: text(DESCRIPTION),
        tags: text(TAGS),
        matched_terms: BTreeSet::new(),
        score,
        shard: shard.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
