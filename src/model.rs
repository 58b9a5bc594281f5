//! # Document Model
//!
//! The engine consumes documents, it does not own them. A host (a static
//! site generator, a CMS, a test) hands us an ordered sequence of records;
//! all the core ever does with one is look up metadata fields on it.
//! [`Document`] is that reduced view: a field map plus the name of the
//! collection it came from.
//!
//! ## Field Values
//!
//! A field holds either a scalar or a sequence of scalars. [`FieldValue`]
//! captures the shapes that front-matter style metadata actually takes:
//!
//! | Variant | Example front matter |
//! |---------|----------------------|
//! | `Bool`  | `draft: true` |
//! | `Int`   | `weight: 3` |
//! | `Float` | `rating: 4.5` |
//! | `Date`  | `date: 2024-06-01` |
//! | `Str`   | `category: software` |
//! | `Seq`   | `tags: [rust, cli]` |
//!
//! The enum is deserialized untagged, with `Date` tried before `Str` so that
//! ISO-formatted date strings arrive as dates.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scalar or sequence value of a document metadata field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Str(String),
    Seq(Vec<FieldValue>),
}

impl FieldValue {
    /// Get the string if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the date if this is a `Date`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the elements if this is a `Seq`.
    pub fn as_seq(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Seq(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Seq(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        FieldValue::Seq(v.into_iter().map(FieldValue::from).collect())
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        FieldValue::Seq(v)
    }
}

/// A content document as seen by the engine: a metadata field map plus the
/// collection it came from.
///
/// The `collection` tag exists for host orchestration (picking which
/// documents feed which index page); the core never branches on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub data: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            data: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.data.insert(field.into(), value.into());
        self
    }

    /// Look up a metadata field. Absent fields are `None`, never an error.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }
}
