//! Filter value types: the raw configuration shapes users write and the
//! canonical tagged union the evaluator consumes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A filter specification as it appears in host configuration, before
/// normalization. Users write these as plain strings, numbers, lists, or
/// maps; we accept every shape and let [`crate::filter::normalize`] reduce
/// them to one canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFilter {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<RawFilter>),
    Map(BTreeMap<String, RawFilter>),
}

/// How the children of a composite filter combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    And,
    Or,
}

impl Join {
    /// Parse a user-written join keyword. Anything but `and`/`or`
    /// (case-insensitive, surrounding whitespace ignored) is rejected.
    pub fn parse(s: &str) -> Option<Join> {
        match s.trim().to_lowercase().as_str() {
            "and" => Some(Join::And),
            "or" => Some(Join::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Join::And => write!(f, "and"),
            Join::Or => write!(f, "or"),
        }
    }
}

/// An inclusive range endpoint. Bounds of one range always share a type
/// after normalization (integer/float mismatches are widened to float).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Int(i64),
    Float(f64),
    Date(NaiveDate),
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Bound) -> Option<Ordering> {
        match (self, other) {
            (Bound::Int(a), Bound::Int(b)) => a.partial_cmp(b),
            (Bound::Float(a), Bound::Float(b)) => a.partial_cmp(b),
            (Bound::Date(a), Bound::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(i) => write!(f, "{}", i),
            Bound::Float(x) => write!(f, "{}", x),
            Bound::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// A canonical filter node, ready for evaluation.
///
/// Invariants guaranteed by normalization:
/// - `Range` has at least one bound, both bounds share a type, `min <= max`.
/// - `Group.list` is never empty.
/// - A `Group` with `join: None` evaluates as `or`.
#[derive(Debug, Clone)]
pub enum Filter {
    Str(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Regex(Regex),
    Range {
        min: Option<Bound>,
        max: Option<Bound>,
    },
    Group {
        list: Vec<Filter>,
        join: Option<Join>,
    },
}

// Regex carries no equality; compare by pattern text.
impl PartialEq for Filter {
    fn eq(&self, other: &Filter) -> bool {
        match (self, other) {
            (Filter::Str(a), Filter::Str(b)) => a == b,
            (Filter::Int(a), Filter::Int(b)) => a == b,
            (Filter::Float(a), Filter::Float(b)) => a == b,
            (Filter::Date(a), Filter::Date(b)) => a == b,
            (Filter::Regex(a), Filter::Regex(b)) => a.as_str() == b.as_str(),
            (
                Filter::Range { min: a_min, max: a_max },
                Filter::Range { min: b_min, max: b_max },
            ) => a_min == b_min && a_max == b_max,
            (
                Filter::Group { list: a_list, join: a_join },
                Filter::Group { list: b_list, join: b_join },
            ) => a_list == b_list && a_join == b_join,
            _ => false,
        }
    }
}

impl fmt::Display for Filter {
    /// Single-line human description of a filter, for logs and diagnostics:
    /// `"a or b"`, `"5 to 10"`, `"3 or more"`, `"7 or less"`, nested groups
    /// in parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Str(s) => {
                write!(f, "{}", s.split_whitespace().collect::<Vec<_>>().join(" "))
            }
            Filter::Int(i) => write!(f, "{}", i),
            Filter::Float(x) => write!(f, "{}", x),
            Filter::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Filter::Regex(re) => write!(f, "/{}/", re.as_str()),
            Filter::Range { min, max } => match (min, max) {
                (Some(lo), Some(hi)) => write!(f, "{} to {}", lo, hi),
                (Some(lo), None) => write!(f, "{} or more", lo),
                (None, Some(hi)) => write!(f, "{} or less", hi),
                (None, None) => Ok(()),
            },
            Filter::Group { list, join } => {
                let sep = format!(" {} ", join.unwrap_or(Join::Or));
                let parts: Vec<String> = list
                    .iter()
                    .map(|child| match child {
                        Filter::Group { .. } => format!("({})", child),
                        other => other.to_string(),
                    })
                    .collect();
                write!(f, "{}", parts.join(&sep))
            }
        }
    }
}

/// The single sentinel for "this whole filter is unusable". Callers must
/// treat it as "apply no filtering", never as a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidFilter {
    /// Every element was dropped during normalization.
    #[error("filter has no valid elements")]
    Empty,
    /// A composite's `list` value normalized to an invalid filter.
    #[error("composite filter list is invalid")]
    InvalidList,
}
