//! Interval Normalizer
//!
//! First pipeline stage: promotes the textual effective-date columns of an
//! input relation to [`FieldValue::Date`] so the join predicate and the
//! window folds can compare them with `<=` / `>=`.
//!
//! Parse failures are recovered, not fatal: an unparseable cell becomes
//! `Null` and flows through the joins under the usual null semantics. The
//! stage is idempotent - normalizing an already-normalized relation is a
//! no-op.

use chrono::NaiveDate;
use log::warn;

use super::types::{FieldValue, TemporalRecord};

/// Parse a single cell as a calendar date
///
/// Accepts ISO `YYYY-MM-DD` plus the slash and day-first variants seen in
/// exported history data. Anything else - including a non-string,
/// non-date value - yields `Null`.
pub fn parse_date_cell(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Date(d) => FieldValue::Date(*d),
        FieldValue::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
            .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
            .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Null),
        _ => FieldValue::Null,
    }
}

/// Normalize the named date columns of every record in a relation
///
/// Only the listed columns are touched; records missing one of them are left
/// as-is (required-column enforcement is the pipeline's validation step, not
/// this stage's concern).
pub fn normalize_relation(
    records: Vec<TemporalRecord>,
    date_columns: &[&str],
) -> Vec<TemporalRecord> {
    records
        .into_iter()
        .map(|mut record| {
            for column in date_columns {
                if let Some(value) = record.fields.get(*column) {
                    let parsed = parse_date_cell(value);
                    if parsed.is_null() && !value.is_null() {
                        warn!(
                            "unparseable date '{}' in column '{}', treating as null",
                            value, column
                        );
                    }
                    record.fields.insert((*column).to_string(), parsed);
                }
            }
            record
        })
        .collect()
}
