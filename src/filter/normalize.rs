//! # Filter Normalization
//!
//! Hosts let users write filters in whatever shape is convenient:
//!
//! ```yaml
//! category: software            # one string, possibly "a, b; c" delimited
//! tag: [ruby, go]               # a list
//! weight: { min: 5, max: 10 }   # a range
//! lang: { list: [/^en/i, de], join: or }   # an explicit composite
//! ```
//!
//! Everything funnels through [`normalize`], which reduces any of those to
//! the canonical [`Filter`] tree or reports the whole filter as invalid.
//!
//! ## Degradation policy
//!
//! Malformed *elements* are dropped silently: a range with unparseable
//! bounds, a boolean in a list, a nested list below the one flattening
//! level. Only when nothing survives does normalization fail, and then with
//! the single [`InvalidFilter`] sentinel that callers translate to "no
//! filtering" — never a panic, never an error to the host.
//!
//! ## Purity
//!
//! The `now`/`today` range-bound keywords resolve against an explicit
//! `today` argument. [`normalize_now`] is the convenience wrapper that reads
//! the clock; everything else is a pure function of its inputs.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::value::{Bound, Filter, InvalidFilter, Join, RawFilter};

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+\.\d+$").unwrap());
static REGEX_LITERAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/.+/i?$").unwrap());
static ELEMENT_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Normalize a raw filter specification into canonical form.
///
/// Returns the canonical [`Filter`] (always a [`Filter::Group`] at the top
/// level) or [`InvalidFilter`] when no usable element survives. `today` is
/// what the `now`/`today` bound keywords resolve to.
pub fn normalize(raw: &RawFilter, today: NaiveDate) -> Result<Filter, InvalidFilter> {
    if let Some(group) = try_composite(raw, today)? {
        return Ok(group);
    }
    let list = normalize_list(raw, today)?;
    Ok(Filter::Group {
        list,
        join: Some(Join::Or),
    })
}

/// [`normalize`] with `today` taken from the local clock.
pub fn normalize_now(raw: &RawFilter) -> Result<Filter, InvalidFilter> {
    normalize(raw, Local::now().date_naive())
}

/// Handle the explicit-composite shape: a map carrying a `list` key.
///
/// Only `list` and `join` are honored; other keys are discarded. A `join`
/// that is not `and`/`or` is dropped, leaving evaluation to its `or`
/// default. Returns `Ok(None)` when `raw` is not a composite at all.
fn try_composite(raw: &RawFilter, today: NaiveDate) -> Result<Option<Filter>, InvalidFilter> {
    let RawFilter::Map(map) = raw else {
        return Ok(None);
    };
    let Some(list_raw) = map.get("list") else {
        return Ok(None);
    };

    // An invalid inner list invalidates the whole composite.
    let list = wrapped_list(list_raw, today).map_err(|_| InvalidFilter::InvalidList)?;
    let join = match map.get("join") {
        Some(RawFilter::Str(s)) => Join::parse(s),
        _ => None,
    };
    Ok(Some(Filter::Group { list, join }))
}

/// Recursive ("wrapped") mode: normalize a composite's `list` value to a
/// bare element vector rather than a full group. A nested composite becomes
/// a single group element, so explicit and/or trees nest.
fn wrapped_list(raw: &RawFilter, today: NaiveDate) -> Result<Vec<Filter>, InvalidFilter> {
    if let Some(group) = try_composite(raw, today)? {
        return Ok(vec![group]);
    }
    normalize_list(raw, today)
}

/// Conform any non-composite shape into a flat vector of canonical elements.
fn normalize_list(raw: &RawFilter, today: NaiveDate) -> Result<Vec<Filter>, InvalidFilter> {
    // Step 1: conform to an element array.
    let elements: Vec<RawFilter> = match raw {
        // Blank parts are dropped, so an empty or all-delimiter string
        // yields no elements and the filter as a whole is invalid.
        RawFilter::Str(s) => ELEMENT_SPLIT_RE
            .split(s)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| RawFilter::Str(part.to_string()))
            .collect(),
        // Step 2: flatten exactly one level; deeper nesting is dropped by
        // the element mapping below.
        RawFilter::Seq(items) => items
            .iter()
            .flat_map(|item| match item {
                RawFilter::Seq(inner) => inner.clone(),
                other => vec![other.clone()],
            })
            .collect(),
        other => vec![other.clone()],
    };

    // Step 3: map each element, dropping the ones that fail.
    let list: Vec<Filter> = elements
        .iter()
        .filter_map(|element| normalize_element(element, today))
        .collect();

    if list.is_empty() {
        return Err(InvalidFilter::Empty);
    }
    Ok(list)
}

fn normalize_element(element: &RawFilter, today: NaiveDate) -> Option<Filter> {
    match element {
        RawFilter::Str(s) => Some(interpret_string(s.trim())),
        RawFilter::Int(i) => Some(Filter::Int(*i)),
        RawFilter::Float(x) => Some(Filter::Float(*x)),
        RawFilter::Map(map) => normalize_range(map, today),
        // Booleans and still-nested sequences are not acceptable elements.
        RawFilter::Bool(_) | RawFilter::Seq(_) => None,
    }
}

/// Interpret a string element: integer, then float, then date, then regex
/// literal, falling back to a plain string match.
fn interpret_string(s: &str) -> Filter {
    if INT_RE.is_match(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Filter::Int(i);
        }
    }
    if FLOAT_RE.is_match(s) {
        if let Ok(x) = s.parse::<f64>() {
            return Filter::Float(x);
        }
    }
    if let Some(date) = parse_date(s) {
        return Filter::Date(date);
    }
    if let Some(re) = parse_regex_literal(s) {
        return Filter::Regex(re);
    }
    Filter::Str(s.to_string())
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// `/pattern/` with an optional trailing `i` flag. A string that looks like
/// a regex literal but fails to compile stays a plain string match.
fn parse_regex_literal(s: &str) -> Option<Regex> {
    if !REGEX_LITERAL_RE.is_match(s) {
        return None;
    }
    let case_insensitive = s.ends_with('i');
    let inner = s
        .strip_prefix('/')?
        .strip_suffix(if case_insensitive { "/i" } else { "/" })?;
    RegexBuilder::new(inner)
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// Conform a `{min, max}` map into a canonical range element.
///
/// Bounds that fail to coerce are dropped rather than erroring; a map left
/// with neither bound, or with bounds of different types after int→float
/// widening, drops the whole element. Reversed bounds are swapped so
/// `min <= max` always holds.
fn normalize_range(map: &BTreeMap<String, RawFilter>, today: NaiveDate) -> Option<Filter> {
    let min = map.get("min").and_then(|v| interpret_bound(v, today));
    let max = map.get("max").and_then(|v| interpret_bound(v, today));

    match (min, max) {
        (None, None) => None,
        (Some(lo), Some(hi)) => {
            let (lo, hi) = widen(lo, hi)?;
            let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
            Some(Filter::Range {
                min: Some(lo),
                max: Some(hi),
            })
        }
        (min, max) => Some(Filter::Range { min, max }),
    }
}

fn interpret_bound(value: &RawFilter, today: NaiveDate) -> Option<Bound> {
    match value {
        RawFilter::Int(i) => Some(Bound::Int(*i)),
        RawFilter::Float(x) => Some(Bound::Float(*x)),
        RawFilter::Str(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("now") || s.eq_ignore_ascii_case("today") {
                return Some(Bound::Date(today));
            }
            if INT_RE.is_match(s) {
                return s.parse::<i64>().ok().map(Bound::Int);
            }
            if FLOAT_RE.is_match(s) {
                return s.parse::<f64>().ok().map(Bound::Float);
            }
            parse_date(s).map(Bound::Date)
        }
        _ => None,
    }
}

/// Widen integer/float bound pairs to float; any other mixed pair is
/// irreconcilable.
fn widen(lo: Bound, hi: Bound) -> Option<(Bound, Bound)> {
    match (lo, hi) {
        (Bound::Int(a), Bound::Float(b)) => Some((Bound::Float(a as f64), Bound::Float(b))),
        (Bound::Float(a), Bound::Int(b)) => Some((Bound::Float(a), Bound::Float(b as f64))),
        (Bound::Int(_), Bound::Int(_))
        | (Bound::Float(_), Bound::Float(_))
        | (Bound::Date(_), Bound::Date(_)) => Some((lo, hi)),
        _ => None,
    }
}
