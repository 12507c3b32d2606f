//! Interval Intersector & Projector
//!
//! Final pipeline stage. A fully joined row carries up to three date
//! intervals - the driving department relation's own columns plus the
//! aliased address and mobile columns, any of which may be null after a
//! non-match. The intersected validity window is the greatest of the
//! contributing start dates and the least of the contributing end dates,
//! computed with null-skipping folds: an absent side is excluded from the
//! fold rather than nulling the whole window out. Only when every
//! contributing bound is absent is the output bound absent.
//!
//! Projection then selects the seven output columns. No deduplication, no
//! sorting, and no filtering of rows whose derived window came out empty or
//! inverted - those pass through as-is.

use super::types::{FieldValue, TemporalRecord};

/// Output relation columns, in write order
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "customer",
    "department",
    "address",
    "mobile_no",
    "eff_start_date",
    "eff_end_date",
    "active",
];

/// Greatest of the non-null date values; `Null` when none is a date
pub fn fold_greatest<'a, I>(values: I) -> FieldValue
where
    I: IntoIterator<Item = &'a FieldValue>,
{
    values
        .into_iter()
        .filter_map(|v| v.as_date())
        .max()
        .map(FieldValue::Date)
        .unwrap_or(FieldValue::Null)
}

/// Least of the non-null date values; `Null` when none is a date
pub fn fold_least<'a, I>(values: I) -> FieldValue
where
    I: IntoIterator<Item = &'a FieldValue>,
{
    values
        .into_iter()
        .filter_map(|v| v.as_date())
        .min()
        .map(FieldValue::Date)
        .unwrap_or(FieldValue::Null)
}

/// Projects fully joined rows onto the output relation
///
/// Reads the driving relation's fields under their original names and the
/// joined sides under their aliases; the constructor pre-computes the
/// aliased column names once per run.
#[derive(Debug, Clone)]
pub struct ResultProjector {
    address_column: String,
    mobile_column: String,
    address_interval: (String, String),
    mobile_interval: (String, String),
}

impl ResultProjector {
    /// Create a projector for the given right-side aliases
    pub fn new(address_alias: &str, mobile_alias: &str) -> Self {
        Self {
            address_column: format!("{}.address", address_alias),
            mobile_column: format!("{}.mobile_no", mobile_alias),
            address_interval: (
                format!("{}.eff_start_date", address_alias),
                format!("{}.eff_end_date", address_alias),
            ),
            mobile_interval: (
                format!("{}.eff_start_date", mobile_alias),
                format!("{}.eff_end_date", mobile_alias),
            ),
        }
    }

    /// Derive the intersected window and project one joined row
    pub fn project(&self, record: &TemporalRecord) -> TemporalRecord {
        let eff_start = fold_greatest([
            record.field_or_null("eff_start_date"),
            record.field_or_null(&self.address_interval.0),
            record.field_or_null(&self.mobile_interval.0),
        ]);
        let eff_end = fold_least([
            record.field_or_null("eff_end_date"),
            record.field_or_null(&self.address_interval.1),
            record.field_or_null(&self.mobile_interval.1),
        ]);

        TemporalRecord::from_pairs(vec![
            ("customer", record.field_or_null("customer").clone()),
            ("department", record.field_or_null("department").clone()),
            ("address", record.field_or_null(&self.address_column).clone()),
            ("mobile_no", record.field_or_null(&self.mobile_column).clone()),
            ("eff_start_date", eff_start),
            ("eff_end_date", eff_end),
            ("active", record.field_or_null("active").clone()),
        ])
    }

    /// Project a batch of joined rows
    pub fn project_batch(&self, records: &[TemporalRecord]) -> Vec<TemporalRecord> {
        records.iter().map(|r| self.project(r)).collect()
    }
}
