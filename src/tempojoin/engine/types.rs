//! Core temporal record data types.
//!
//! This module contains the fundamental data types used throughout the join engine:
//! - [`FieldValue`] - The cell value type system
//! - [`TemporalRecord`] - The record format shared by all relations and join outputs

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

/// A value in a relation field
///
/// Covers the types the customer-history relations actually carry. CSV cells
/// load as `String` (or `Null` when empty); the normalizer is the only stage
/// that promotes cells to `Date`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value (true/false)
    Boolean(bool),
    /// Calendar date (YYYY-MM-DD)
    Date(NaiveDate),
    /// Absent value
    Null,
}

impl FieldValue {
    /// Get the type name for error messages and debugging
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "INTEGER",
            FieldValue::Float(_) => "FLOAT",
            FieldValue::String(_) => "STRING",
            FieldValue::Boolean(_) => "BOOLEAN",
            FieldValue::Date(_) => "DATE",
            FieldValue::Null => "NULL",
        }
    }

    /// Check if this value is the absent marker
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// View this value as a calendar date, if it is one
    ///
    /// Comparisons in the join predicate and the window folds only ever see
    /// dates through this accessor; any non-date (including `Null`) is opaque
    /// to them.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Convert this value to a string representation for output
    ///
    /// Clean, SQL-like formatting: dates as YYYY-MM-DD, `Null` as the empty
    /// string so an absent cell round-trips through the CSV sink.
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::String(s) => s.clone(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d),
        }
    }
}

/// A single row of a time-versioned relation
///
/// The same shape flows through the whole pipeline: raw input rows, the
/// intermediate joined rows (with right-side fields namespaced under their
/// relation alias), and the final projected output. Stages produce new
/// records rather than mutating the fields of earlier stages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemporalRecord {
    /// The field data for this record
    pub fields: HashMap<String, FieldValue>,
}

impl TemporalRecord {
    /// Create a new record with the given fields
    pub fn new(fields: HashMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Build a record from `(name, value)` pairs
    pub fn from_pairs(pairs: Vec<(&str, FieldValue)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// Look up a field by name
    ///
    /// A missing field and a `Null` field are distinct states; callers that
    /// want SQL semantics use [`TemporalRecord::field_or_null`].
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up a field, treating a missing field as `Null`
    pub fn field_or_null(&self, name: &str) -> &FieldValue {
        self.fields.get(name).unwrap_or(&FieldValue::Null)
    }

    /// Return a copy of this record with one field added or replaced
    pub fn with_field(&self, name: &str, value: FieldValue) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(name.to_string(), value);
        Self { fields }
    }
}
