//! # Metadata Indexer
//!
//! Groups a document sequence into named buckets by the values of one
//! metadata key, so a host can build one index page per category, tag, or
//! locale.
//!
//! ## Key Normalization
//!
//! Users are inconsistent about how they write multi-valued fields: proper
//! lists (`tags: [a, b]`), delimited strings (`tags: "a, b"`), even
//! delimited strings *inside* lists. The indexer accepts all of them:
//!
//! 1. A single string splits on `;`, `,`, or whitespace.
//! 2. A sequence contributes one key per element, each split again on
//!    `;`/`,` in case the user wrote a delimited string in the list.
//! 3. Every key is lower-cased and trimmed before insertion.
//!
//! A document lands in one bucket per distinct key it carries; documents
//! missing the field, or whose value is blank, are excluded entirely.
//! Bucket contents preserve document input order — the indexer imposes no
//! sorting of its own.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Document, FieldValue};

static KEY_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,\s]").unwrap());
static SUB_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,]").unwrap());

/// Buckets of documents keyed by normalized metadata value.
pub type DocumentIndex = BTreeMap<String, Vec<Document>>;

/// Group documents by the values of `key`.
///
/// See the module docs for the key normalization rules. Callers that have
/// no key configured should skip indexing and use the document sequence
/// as-is.
pub fn index_by_key(docs: &[Document], key: &str) -> DocumentIndex {
    let mut index = DocumentIndex::new();
    for doc in docs {
        let Some(value) = doc.get(key) else {
            continue;
        };
        if value.to_string().trim().is_empty() {
            continue;
        }

        let raw_keys: Vec<String> = match value {
            FieldValue::Str(s) => KEY_SPLIT_RE.split(s).map(str::to_string).collect(),
            FieldValue::Seq(items) => items.iter().map(|v| v.to_string()).collect(),
            other => vec![other.to_string()],
        };

        for raw in &raw_keys {
            for part in SUB_SPLIT_RE.split(raw) {
                let bucket_key = part.trim().to_lowercase();
                if bucket_key.is_empty() {
                    continue;
                }
                index.entry(bucket_key).or_default().push(doc.clone());
            }
        }
    }
    tracing::debug!(
        "indexed {} documents on '{}' into {} buckets",
        docs.len(),
        key,
        index.len()
    );
    index
}

/// Documents common to every list, unique, in first-list order. Any empty
/// operand collapses the intersection to nothing.
pub fn intersect(first: &[Document], rest: &[&[Document]]) -> Vec<Document> {
    let mut out: Vec<Document> = Vec::new();
    for doc in first {
        if !out.contains(doc) {
            out.push(doc.clone());
        }
    }
    for other in rest {
        if other.is_empty() {
            return Vec::new();
        }
        out.retain(|doc| other.contains(doc));
    }
    out
}

/// Documents present in any list, unique, in first-seen order.
pub fn union(first: &[Document], rest: &[&[Document]]) -> Vec<Document> {
    let mut out: Vec<Document> = Vec::new();
    for doc in first.iter().chain(rest.iter().flat_map(|list| list.iter())) {
        if !out.contains(doc) {
            out.push(doc.clone());
        }
    }
    out
}
