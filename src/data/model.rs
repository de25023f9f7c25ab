use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// FieldValue – a single cell in a test-data record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value.  CSV cells stay textual, JSON and
/// spreadsheet cells keep their native scalar types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl FieldValue {
    /// Borrow the value as text, for consumers that compare fields as
    /// strings (credentials, expected-result markers).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the value carries no information: `Null`, or text that is
    /// empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of test data
// ---------------------------------------------------------------------------

/// One row of test input plus expected outcome, as a field → value map.
///
/// Field ordering is not significant; `BTreeMap` keeps iteration stable
/// regardless of source-column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field value as text, or `default` when the field is absent, `Null`,
    /// or non-textual.
    pub fn get_str<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.fields
            .get(field)
            .and_then(FieldValue::as_str)
            .unwrap_or(default)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names in iteration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A record is blank when every field value is blank after trimming.
    /// Blank records never reach the caller: loaders drop them silently.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(FieldValue::is_blank)
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::String("   ".into()).is_blank());
        assert!(!FieldValue::String("x".into()).is_blank());
        assert!(!FieldValue::Integer(0).is_blank());
        assert!(!FieldValue::Bool(false).is_blank());
    }

    #[test]
    fn record_is_blank_only_when_all_fields_are() {
        let mut record = Record::new();
        record.insert("username", FieldValue::String("  ".into()));
        record.insert("password", FieldValue::Null);
        assert!(record.is_blank());

        record.insert("username", FieldValue::String("alice".into()));
        assert!(!record.is_blank());
    }

    #[test]
    fn get_str_falls_back_on_missing_or_nontextual() {
        let mut record = Record::new();
        record.insert("username", FieldValue::String("alice".into()));
        record.insert("attempts", FieldValue::Integer(3));
        assert_eq!(record.get_str("username", ""), "alice");
        assert_eq!(record.get_str("attempts", ""), "");
        assert_eq!(record.get_str("missing", "fallback"), "fallback");
    }
}
