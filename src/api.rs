//! # Engine Facade
//!
//! The engine never talks to a concrete host directly. Everything it needs
//! from the outside world is one capability: look up the documents of a
//! named collection. [`DocumentSource`] is that seam, and
//! [`PaginationEngine`] is the thin facade a host drives.
//!
//! The facade only dispatches and wires inputs together — fetch, filter,
//! paginate. The logic lives in [`crate::indexer`], [`crate::filter`], and
//! [`crate::paginator`]; page registration, rendering, and auto-page
//! enumeration stay on the host's side of the seam.
//!
//! Generic over `DocumentSource`, so production hosts and in-memory test
//! sources use the same code path.

use chrono::Local;

use crate::config::PaginationConfig;
use crate::error::Result;
use crate::filter::filter_documents;
use crate::indexer::{index_by_key, DocumentIndex};
use crate::model::Document;
use crate::paginator::{paginate, Paginator};

/// Collection lookup capability provided by the host.
pub trait DocumentSource {
    /// Documents of a named collection, in the host's order. Unknown names
    /// yield an empty vec.
    fn collection(&self, name: &str) -> Vec<Document>;
}

/// The main entry point for pagination runs, generic over the host's
/// [`DocumentSource`].
pub struct PaginationEngine<S: DocumentSource> {
    source: S,
}

impl<S: DocumentSource> PaginationEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Group a collection's documents by a metadata key. With no key
    /// configured, skip indexing and use [`DocumentSource::collection`]
    /// directly — the unfiltered sequence is the "index".
    pub fn index(&self, collection: &str, key: &str) -> DocumentIndex {
        index_by_key(&self.source.collection(collection), key)
    }

    /// Build the full page sequence for a collection: fetch its documents,
    /// narrow them through every configured per-key filter, then paginate
    /// against `first_page_url`.
    pub fn pages_for(
        &self,
        collection: &str,
        first_page_url: &str,
        config: &PaginationConfig,
    ) -> Result<Vec<Paginator>> {
        let mut docs = self.source.collection(collection);
        let today = Local::now().date_naive();
        for (key, raw) in &config.filters {
            docs = filter_documents(&docs, Some(key), Some(raw), today);
        }
        paginate(config, first_page_url, &docs)
    }
}
