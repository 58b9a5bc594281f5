//! # Filter System
//!
//! Users narrow a document set with filter expressions written in loose
//! configuration shapes: a delimited string, a list, a `{min, max}` range,
//! or an explicit `{list, join}` composite. This module provides:
//!
//! - **Value types**: [`RawFilter`] (what users write) and [`Filter`]
//!   (the canonical tagged union)
//! - **Normalization**: [`normalize`] reduces any raw shape to canonical
//!   form, or to the single [`InvalidFilter`] sentinel
//! - **Evaluation**: [`matches`] tests one field value, and
//!   [`filter_documents`] applies the full contract across a document set
//!
//! ## Usage
//!
//! ```ignore
//! let raw: RawFilter = serde_json::from_value(json!({"list": ["ruby", "go"]}))?;
//! let filter = normalize_now(&raw)?;
//! if matches(&filter, doc.get("tags").unwrap()) { ... }
//! ```
//!
//! Invalid filters are never errors at the document boundary: callers of
//! [`filter_documents`] get their input back unchanged when a filter is
//! unusable.

mod eval;
mod normalize;
mod value;

pub use eval::{filter_documents, matches};
pub use normalize::{normalize, normalize_now};
pub use value::{Bound, Filter, InvalidFilter, Join, RawFilter};
