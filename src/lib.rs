//! # pagez
//!
//! A filter/index/paginate engine for content collections.
//!
//! Static site hosts hand pagez an ordered set of documents (posts, pages,
//! schema-less records) and a pagination configuration; pagez groups the
//! documents by metadata keys, narrows them with user-written filter
//! expressions, slices the survivors into fixed-size pages, and computes
//! every page's URL and prev/next/first/last navigation links.
//!
//! ## Pipeline
//!
//! ```text
//! documents ──> indexer (group by key)
//!          ──> filter  (normalize + evaluate predicates)
//!          ──> paginator (slice + navigation links)
//! ```
//!
//! - [`indexer`]: bucket documents by the delimiter-split, case-normalized
//!   values of one metadata key.
//! - [`filter`]: accept filters as strings, lists, ranges, or composites;
//!   normalize them to one canonical tree; evaluate against field values.
//!   Unusable filters degrade to "no filtering", never to an error.
//! - [`paginator`]: fixed-size page windows with placeholder-substituted
//!   URLs (`:num`, `:max`) and boundary-aware navigation.
//! - [`api`]: the [`PaginationEngine`] facade and the [`DocumentSource`]
//!   seam hosts implement.
//!
//! Rendering, page registration, file I/O, and front-matter parsing are
//! host concerns; pagez works purely on in-memory documents, synchronously,
//! one generation run at a time.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod indexer;
pub mod model;
pub mod paginator;
pub mod urls;

pub use api::{DocumentSource, PaginationEngine};
pub use config::PaginationConfig;
pub use error::{PagezError, Result};
pub use filter::{filter_documents, matches, normalize, normalize_now};
pub use filter::{Bound, Filter, InvalidFilter, Join, RawFilter};
pub use indexer::{index_by_key, intersect, union, DocumentIndex};
pub use model::{Document, FieldValue};
pub use paginator::{paginate, total_pages, Paginator, TrailEntry};
