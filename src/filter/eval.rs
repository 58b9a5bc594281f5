//! # Filter Evaluation
//!
//! Turns a canonical [`Filter`] tree into a boolean test over one document
//! field value. The field value is first coerced to a flat sequence of
//! scalars — a single delimited string like `"go, rust"` becomes
//! `["go", "rust"]` — and every predicate then asks "does any element
//! satisfy me?". Group nodes combine their children with `or` (default) or
//! `and`; children are pure, so evaluation order is unobservable.

use chrono::NaiveDate;

use super::normalize::{normalize, parse_date};
use super::value::{Bound, Filter, Join, RawFilter};
use crate::model::{Document, FieldValue};

use once_cell::sync::Lazy;
use regex::Regex;

// Field values split on commas/semicolons only; whitespace is a delimiter
// for index keys but not for filter matching.
static VALUE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").unwrap());

/// Test a document field value against a canonical filter.
pub fn matches(filter: &Filter, value: &FieldValue) -> bool {
    let elements = scalar_elements(value);
    matches_elements(filter, &elements)
}

/// Keep the documents whose `key` field satisfies `filter`.
///
/// Passthrough contract: when `key` or `filter` is absent, or the filter
/// normalizes to invalid, the input comes back unchanged — an unusable
/// filter must never silently empty a collection.
pub fn filter_documents(
    docs: &[Document],
    key: Option<&str>,
    filter: Option<&RawFilter>,
    today: NaiveDate,
) -> Vec<Document> {
    let (Some(key), Some(raw)) = (key, filter) else {
        return docs.to_vec();
    };
    let filter = match normalize(raw, today) {
        Ok(filter) => filter,
        Err(reason) => {
            tracing::warn!("ignoring invalid filter for '{}': {}", key, reason);
            return docs.to_vec();
        }
    };
    tracing::debug!(
        "filtering {} documents on '{}' with: {}",
        docs.len(),
        key,
        filter
    );
    docs.iter()
        .filter(|doc| doc.get(key).map(|v| matches(&filter, v)).unwrap_or(false))
        .cloned()
        .collect()
}

/// Flatten a field value into scalar elements, splitting delimited strings.
fn scalar_elements(value: &FieldValue) -> Vec<FieldValue> {
    match value {
        FieldValue::Seq(items) => items.iter().flat_map(scalar_elements).collect(),
        FieldValue::Str(s) => VALUE_SPLIT_RE
            .split(s)
            .map(|part| FieldValue::Str(part.trim().to_string()))
            .collect(),
        other => vec![other.clone()],
    }
}

fn matches_elements(filter: &Filter, elements: &[FieldValue]) -> bool {
    match filter {
        Filter::Str(want) => elements.iter().any(|e| e.as_str() == Some(want.as_str())),
        Filter::Int(want) => elements.iter().any(|e| match e {
            FieldValue::Int(i) => i == want,
            FieldValue::Float(x) => *x == *want as f64,
            _ => false,
        }),
        Filter::Float(want) => elements.iter().any(|e| match e {
            FieldValue::Float(x) => x == want,
            FieldValue::Int(i) => *i as f64 == *want,
            _ => false,
        }),
        Filter::Date(want) => elements.iter().any(|e| element_date(e) == Some(*want)),
        Filter::Regex(re) => elements.iter().any(|e| re.is_match(&e.to_string())),
        Filter::Range { min, max } => elements.iter().any(|e| in_range(e, *min, *max)),
        Filter::Group { list, join } => match join.unwrap_or(Join::Or) {
            Join::Or => list.iter().any(|child| matches_elements(child, elements)),
            Join::And => list.iter().all(|child| matches_elements(child, elements)),
        },
    }
}

fn in_range(element: &FieldValue, min: Option<Bound>, max: Option<Bound>) -> bool {
    // The bound that is present decides the comparison domain; normalization
    // guarantees both bounds share it.
    let Some(domain) = min.or(max) else {
        return false;
    };
    match domain {
        Bound::Date(_) => {
            let Some(d) = element_date(element) else {
                return false;
            };
            let lo_ok = match min {
                Some(Bound::Date(lo)) => d >= lo,
                Some(_) => false,
                None => true,
            };
            let hi_ok = match max {
                Some(Bound::Date(hi)) => d <= hi,
                Some(_) => false,
                None => true,
            };
            lo_ok && hi_ok
        }
        Bound::Int(_) | Bound::Float(_) => {
            let Some(x) = element_number(element) else {
                return false;
            };
            let lo_ok = match min {
                Some(Bound::Int(lo)) => x >= lo as f64,
                Some(Bound::Float(lo)) => x >= lo,
                Some(Bound::Date(_)) => false,
                None => true,
            };
            let hi_ok = match max {
                Some(Bound::Int(hi)) => x <= hi as f64,
                Some(Bound::Float(hi)) => x <= hi,
                Some(Bound::Date(_)) => false,
                None => true,
            };
            lo_ok && hi_ok
        }
    }
}

fn element_number(element: &FieldValue) -> Option<f64> {
    match element {
        FieldValue::Int(i) => Some(*i as f64),
        FieldValue::Float(x) => Some(*x),
        FieldValue::Str(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn element_date(element: &FieldValue) -> Option<NaiveDate> {
    match element {
        FieldValue::Date(d) => Some(*d),
        FieldValue::Str(s) => parse_date(s.trim()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::normalize_now;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filter(v: serde_json::Value) -> Filter {
        normalize(&serde_json::from_value(v).unwrap(), today()).unwrap()
    }

    #[test]
    fn string_literal_matches_after_delimiter_split() {
        let f = filter(json!({"list": ["ruby", "go"], "join": "or"}));
        assert!(matches(&f, &FieldValue::from("go, rust")));
        assert!(!matches(&f, &FieldValue::from("rust, c")));
    }

    #[test]
    fn string_literal_matches_sequence_elements() {
        let f = filter(json!("go"));
        assert!(matches(&f, &FieldValue::from(vec!["go", "rust"])));
        assert!(!matches(&f, &FieldValue::from(vec!["golang"])));
    }

    #[test]
    fn integer_literal_matches_numerically() {
        let f = filter(json!(5));
        assert!(matches(&f, &FieldValue::Int(5)));
        assert!(matches(&f, &FieldValue::Float(5.0)));
        assert!(!matches(&f, &FieldValue::Int(6)));
        // Strings are not coerced for literal matches.
        assert!(!matches(&f, &FieldValue::from("5")));
    }

    #[test]
    fn regex_matches_any_element() {
        let f = filter(json!("/^go/i"));
        assert!(matches(&f, &FieldValue::from("Golang, rust")));
        assert!(!matches(&f, &FieldValue::from("django")));
    }

    #[test]
    fn numeric_range_matches_inclusively() {
        let f = filter(json!({"min": 5, "max": 10}));
        assert!(matches(&f, &FieldValue::Int(5)));
        assert!(matches(&f, &FieldValue::Int(10)));
        assert!(matches(&f, &FieldValue::Float(7.5)));
        assert!(!matches(&f, &FieldValue::Int(11)));
        // Numeric-looking strings are accepted for ranges.
        assert!(matches(&f, &FieldValue::from("7")));
        assert!(!matches(&f, &FieldValue::from("eleven")));
    }

    #[test]
    fn open_ended_ranges() {
        let at_least = filter(json!({"min": 3}));
        assert!(matches(&at_least, &FieldValue::Int(3)));
        assert!(matches(&at_least, &FieldValue::Int(1000)));
        assert!(!matches(&at_least, &FieldValue::Int(2)));

        let at_most = filter(json!({"max": 3}));
        assert!(matches(&at_most, &FieldValue::Int(-5)));
        assert!(!matches(&at_most, &FieldValue::Int(4)));
    }

    #[test]
    fn date_range_matches_chronologically() {
        let f = filter(json!({"min": "2024-01-01", "max": "today"}));
        let inside = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert!(matches(&f, &FieldValue::Date(inside)));
        assert!(matches(&f, &FieldValue::from("2024-03-01")));
        assert!(!matches(&f, &FieldValue::Date(after)));
        assert!(!matches(&f, &FieldValue::from("not a date")));
    }

    #[test]
    fn and_group_requires_all_children() {
        let f = filter(json!({"list": ["go", "/^r/"], "join": "and"}));
        assert!(matches(&f, &FieldValue::from("go, rust")));
        assert!(!matches(&f, &FieldValue::from("go, c")));
    }

    #[test]
    fn or_is_monotone_and_is_antitone() {
        let value = FieldValue::from("go, rust");

        let small_or = filter(json!({"list": ["go"], "join": "or"}));
        let big_or = filter(json!({"list": ["go", "zig"], "join": "or"}));
        // Adding elements to an or-group never loses a match.
        assert!(matches(&small_or, &value));
        assert!(matches(&big_or, &value));

        let small_and = filter(json!({"list": ["go"], "join": "and"}));
        let big_and = filter(json!({"list": ["go", "zig"], "join": "and"}));
        // Adding elements to an and-group never gains a match.
        assert!(matches(&small_and, &value));
        assert!(!matches(&big_and, &value));
    }

    fn docs() -> Vec<Document> {
        vec![
            Document::new("posts")
                .with("title", "a")
                .with("tags", "go, rust"),
            Document::new("posts")
                .with("title", "b")
                .with("tags", vec!["ruby"]),
            Document::new("posts").with("title", "c"),
        ]
    }

    #[test]
    fn filter_documents_keeps_matching_docs() {
        let raw: RawFilter = serde_json::from_value(json!(["ruby", "go"])).unwrap();
        let kept = filter_documents(&docs(), Some("tags"), Some(&raw), today());
        let titles: Vec<_> = kept
            .iter()
            .map(|d| d.get("title").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn filter_documents_excludes_docs_missing_the_field() {
        // Doc "c" has no tags field at all: excluded no matter the filter.
        let raw: RawFilter = serde_json::from_value(json!("/.*/" )).unwrap();
        let kept = filter_documents(&docs(), Some("tags"), Some(&raw), today());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn filter_documents_passthrough_without_key_or_filter() {
        let raw: RawFilter = serde_json::from_value(json!("go")).unwrap();
        assert_eq!(filter_documents(&docs(), None, Some(&raw), today()).len(), 3);
        assert_eq!(filter_documents(&docs(), Some("tags"), None, today()).len(), 3);
    }

    #[test]
    fn filter_documents_passthrough_on_empty_string_filter() {
        let raw = RawFilter::Str(String::new());
        assert_eq!(
            filter_documents(&docs(), Some("tags"), Some(&raw), today()).len(),
            3
        );
    }

    #[test]
    fn filter_documents_passthrough_on_invalid_filter() {
        let raw: RawFilter = serde_json::from_value(json!([true])).unwrap();
        assert_eq!(
            filter_documents(&docs(), Some("tags"), Some(&raw), today()).len(),
            3
        );
    }

    #[test]
    fn normalize_now_produces_usable_filters() {
        let raw: RawFilter = serde_json::from_value(json!({"max": "now"})).unwrap();
        let f = normalize_now(&raw).unwrap();
        let past = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(matches(&f, &FieldValue::Date(past)));
    }
}
