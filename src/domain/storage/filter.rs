//! Filters and field-change sets for document collections

use regex::Regex;
use serde_json::Value;

use super::Document;

/// A query filter evaluated against a stored document.
///
/// The operator set is deliberately small: it is exactly what the lending
/// core needs from the store (equality for keys and flags, a numeric
/// lower bound for the copy counter, and a regex for title resolution).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Field equals the given value
    Eq(String, Value),
    /// Field is a number strictly greater than the given value
    Gt(String, i64),
    /// Field is a string matching the given pattern. Case-insensitivity is
    /// expressed inline (`(?i)` prefix), mirroring the store's `i` option.
    Regex { field: String, pattern: String },
    /// All sub-filters match
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn gt(field: impl Into<String>, value: i64) -> Self {
        Self::Gt(field.into(), value)
    }

    pub fn regex(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Regex {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    /// Evaluate this filter against a document.
    ///
    /// An invalid regex pattern matches nothing; the pattern ultimately
    /// comes from user input on the title-fallback path and the original
    /// system treated a broken pattern as a failed lookup.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::All => true,
            Self::Eq(field, expected) => document.get(field).unwrap_or(&Value::Null) == expected,
            Self::Gt(field, bound) => document
                .get(field)
                .and_then(Value::as_i64)
                .is_some_and(|n| n > *bound),
            Self::Regex { field, pattern } => {
                let Some(text) = document.get(field).and_then(Value::as_str) else {
                    return false;
                };
                Regex::new(pattern).is_ok_and(|re| re.is_match(text))
            }
            Self::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }
}

/// A single change applied to one field of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    /// Set the field to the given value
    Set(Value),
    /// Add the given delta to a numeric field (missing fields start at 0)
    Inc(i64),
    /// Remove the field entirely
    Unset,
}

/// An ordered set of field changes, applied atomically by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    changes: Vec<(String, FieldChange)>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.changes
            .push((field.into(), FieldChange::Set(value.into())));
        self
    }

    pub fn inc(mut self, field: impl Into<String>, delta: i64) -> Self {
        self.changes.push((field.into(), FieldChange::Inc(delta)));
        self
    }

    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.changes.push((field.into(), FieldChange::Unset));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Apply every change to the document, in order.
    pub fn apply(&self, document: &mut Document) {
        for (field, change) in &self.changes {
            match change {
                FieldChange::Set(value) => {
                    document.insert(field.clone(), value.clone());
                }
                FieldChange::Inc(delta) => {
                    let current = document.get(field).and_then(Value::as_i64).unwrap_or(0);
                    document.insert(field.clone(), Value::from(current + delta));
                }
                FieldChange::Unset => {
                    document.remove(field);
                }
            }
        }
    }
}
