//! Interval Join Processor
//!
//! Left-outer join of two relations where the match criterion is customer
//! identity plus effective-date-range overlap rather than plain equality.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              IntervalJoinProcessor                   │
//! │                                                      │
//! │  left row ──┬── overlapping right rows ──► one       │
//! │             │                              combined  │
//! │             │                              row each  │
//! │             └── no overlap ──► left row + null-filled│
//! │                                right-side columns    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Right-side fields are namespaced under the relation's alias
//! (`a.address`, `a.eff_start_date`, ...) so that no contributing
//! relation's interval columns collide with - or overwrite - another's.
//! That property is what lets the second cascade step test overlap against
//! the driving relation's original, un-narrowed interval.

use super::types::{FieldValue, TemporalRecord};
use crate::tempojoin::schema::Schema;

/// Inclusive interval-overlap predicate
///
/// `[s1,e1]` and `[s2,e2]` overlap iff `s2 <= e1 && e2 >= s1`. Bounds are
/// inclusive on both ends: touching intervals (`e1 == s2`) overlap. A null
/// or non-date bound fails the predicate, matching SQL three-valued
/// comparison semantics.
pub fn intervals_overlap(
    s1: &FieldValue,
    e1: &FieldValue,
    s2: &FieldValue,
    e2: &FieldValue,
) -> bool {
    match (s1.as_date(), e1.as_date(), s2.as_date(), e2.as_date()) {
        (Some(s1), Some(e1), Some(s2), Some(e2)) => s2 <= e1 && e2 >= s1,
        _ => false,
    }
}

/// Configuration for one left-outer interval join
///
/// Column names default to the shared layout of the customer-history
/// relations (`customer` key, `eff_start_date`/`eff_end_date` interval);
/// the builders override them where a cascade step reads the key or the
/// interval from somewhere else.
#[derive(Debug, Clone)]
pub struct IntervalJoinConfig {
    /// Join key column on the left side
    pub left_key: String,
    /// Join key column on the right side
    pub right_key: String,
    /// Left-side interval columns (start, end)
    pub left_interval: (String, String),
    /// Right-side interval columns (start, end)
    pub right_interval: (String, String),
    /// Namespace prefix for right-side fields in the combined row
    pub right_alias: String,
    /// Right relation schema, used to null-fill a missing match
    pub right_schema: Schema,
}

impl IntervalJoinConfig {
    /// Create a config for a right relation with the standard column layout
    pub fn new(right_alias: &str, right_schema: Schema) -> Self {
        Self {
            left_key: "customer".to_string(),
            right_key: "customer".to_string(),
            left_interval: ("eff_start_date".to_string(), "eff_end_date".to_string()),
            right_interval: ("eff_start_date".to_string(), "eff_end_date".to_string()),
            right_alias: right_alias.to_string(),
            right_schema,
        }
    }

    /// Set the key column pair
    pub fn with_key(mut self, left: &str, right: &str) -> Self {
        self.left_key = left.to_string();
        self.right_key = right.to_string();
        self
    }

    /// Set the left-side interval columns
    pub fn with_left_interval(mut self, start: &str, end: &str) -> Self {
        self.left_interval = (start.to_string(), end.to_string());
        self
    }

    /// Set the right-side interval columns
    pub fn with_right_interval(mut self, start: &str, end: &str) -> Self {
        self.right_interval = (start.to_string(), end.to_string());
        self
    }
}

/// Processor for left-outer interval joins over materialized batches
#[derive(Debug, Clone)]
pub struct IntervalJoinProcessor {
    config: IntervalJoinConfig,
}

impl IntervalJoinProcessor {
    /// Create a new interval join processor with configuration
    pub fn new(config: IntervalJoinConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &IntervalJoinConfig {
        &self.config
    }

    /// Compute the left-outer interval join of two relations
    ///
    /// Every left row appears at least once in the output: once per
    /// overlapping right row (fan-out), or once with null-filled right-side
    /// columns when nothing overlaps. Left cardinality is therefore a lower
    /// bound on output cardinality. An empty right relation degenerates
    /// every left row to the null-match case.
    pub fn left_outer_join(
        &self,
        left: &[TemporalRecord],
        right: &[TemporalRecord],
    ) -> Vec<TemporalRecord> {
        let mut results = Vec::with_capacity(left.len());

        for left_record in left {
            let mut matched = false;
            for right_record in right {
                if self.keys_match(left_record, right_record)
                    && self.intervals_match(left_record, right_record)
                {
                    results.push(self.combine_records(left_record, right_record));
                    matched = true;
                }
            }
            if !matched {
                results.push(self.combine_records_with_nulls(left_record));
            }
        }

        results
    }

    /// Key equality; a null key on either side never matches
    fn keys_match(&self, left: &TemporalRecord, right: &TemporalRecord) -> bool {
        let left_key = left.field_or_null(&self.config.left_key);
        let right_key = right.field_or_null(&self.config.right_key);
        !left_key.is_null() && !right_key.is_null() && left_key == right_key
    }

    /// Evaluate the overlap predicate for one candidate pair
    fn intervals_match(&self, left: &TemporalRecord, right: &TemporalRecord) -> bool {
        intervals_overlap(
            left.field_or_null(&self.config.left_interval.0),
            left.field_or_null(&self.config.left_interval.1),
            right.field_or_null(&self.config.right_interval.0),
            right.field_or_null(&self.config.right_interval.1),
        )
    }

    /// Combine a matching pair: left fields keep their names, right fields
    /// land under the configured alias
    fn combine_records(&self, left: &TemporalRecord, right: &TemporalRecord) -> TemporalRecord {
        let mut combined_fields = left.fields.clone();
        for (key, value) in &right.fields {
            combined_fields.insert(
                format!("{}.{}", self.config.right_alias, key),
                value.clone(),
            );
        }
        TemporalRecord::new(combined_fields)
    }

    /// Combine a non-matching left row with a null cell for every column the
    /// right relation's schema declares
    fn combine_records_with_nulls(&self, left: &TemporalRecord) -> TemporalRecord {
        let mut combined_fields = left.fields.clone();
        for name in self.config.right_schema.field_names() {
            combined_fields.insert(
                format!("{}.{}", self.config.right_alias, name),
                FieldValue::Null,
            );
        }
        TemporalRecord::new(combined_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempojoin::schema::{DataType, FieldDefinition};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> FieldValue {
        FieldValue::Date(NaiveDate::from_ymd_opt(y, m, day).unwrap())
    }

    fn address_schema() -> Schema {
        Schema::new(vec![
            FieldDefinition::new("customer", DataType::String),
            FieldDefinition::new("address", DataType::String),
            FieldDefinition::new("eff_start_date", DataType::Date),
            FieldDefinition::new("eff_end_date", DataType::Date),
        ])
    }

    fn left_row(customer: &str, start: FieldValue, end: FieldValue) -> TemporalRecord {
        TemporalRecord::from_pairs(vec![
            ("customer", FieldValue::String(customer.to_string())),
            ("department", FieldValue::String("Sales".to_string())),
            ("eff_start_date", start),
            ("eff_end_date", end),
        ])
    }

    fn right_row(customer: &str, address: &str, start: FieldValue, end: FieldValue) -> TemporalRecord {
        TemporalRecord::from_pairs(vec![
            ("customer", FieldValue::String(customer.to_string())),
            ("address", FieldValue::String(address.to_string())),
            ("eff_start_date", start),
            ("eff_end_date", end),
        ])
    }

    #[test]
    fn test_overlap_boundary_equality_matches() {
        // e1 == s2 must match - bounds are inclusive
        assert!(intervals_overlap(
            &d(2020, 1, 1),
            &d(2020, 6, 30),
            &d(2020, 6, 30),
            &d(2020, 12, 31),
        ));
    }

    #[test]
    fn test_disjoint_intervals_do_not_match() {
        assert!(!intervals_overlap(
            &d(2020, 1, 1),
            &d(2020, 6, 30),
            &d(2020, 7, 1),
            &d(2020, 12, 31),
        ));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (d(2020, 1, 1), d(2020, 6, 30), d(2020, 3, 1), d(2020, 9, 30)),
            (d(2020, 3, 1), d(2020, 3, 31), d(2020, 1, 1), d(2020, 12, 31)),
        ];
        for (s1, e1, s2, e2) in cases {
            assert_eq!(
                intervals_overlap(&s1, &e1, &s2, &e2),
                intervals_overlap(&s2, &e2, &s1, &e1),
            );
        }
    }

    #[test]
    fn test_null_bound_fails_predicate() {
        assert!(!intervals_overlap(
            &FieldValue::Null,
            &d(2020, 12, 31),
            &d(2020, 1, 1),
            &d(2020, 12, 31),
        ));
        assert!(!intervals_overlap(
            &d(2020, 1, 1),
            &d(2020, 12, 31),
            &d(2020, 1, 1),
            &FieldValue::Null,
        ));
    }

    #[test]
    fn test_fan_out_one_row_per_overlapping_match() {
        let processor =
            IntervalJoinProcessor::new(IntervalJoinConfig::new("a", address_schema()));

        let left = vec![left_row("1", d(2020, 1, 1), d(2020, 12, 31))];
        let right = vec![
            right_row("1", "A1", d(2020, 1, 1), d(2020, 6, 30)),
            right_row("1", "A2", d(2020, 7, 1), d(2020, 12, 31)),
            right_row("1", "A3", d(2021, 1, 1), d(2021, 12, 31)), // outside
        ];

        let joined = processor.left_outer_join(&left, &right);
        assert_eq!(joined.len(), 2);
        assert_eq!(
            joined[0].field_or_null("a.address"),
            &FieldValue::String("A1".to_string())
        );
        assert_eq!(
            joined[1].field_or_null("a.address"),
            &FieldValue::String("A2".to_string())
        );
        // Left fields survive un-prefixed
        assert_eq!(
            joined[0].field_or_null("department"),
            &FieldValue::String("Sales".to_string())
        );
    }

    #[test]
    fn test_outer_join_preserves_unmatched_left_row() {
        let processor =
            IntervalJoinProcessor::new(IntervalJoinConfig::new("a", address_schema()));

        let left = vec![left_row("2", d(2020, 1, 1), d(2020, 12, 31))];
        let right = vec![right_row("1", "A1", d(2020, 1, 1), d(2020, 12, 31))];

        let joined = processor.left_outer_join(&left, &right);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].field_or_null("a.address"), &FieldValue::Null);
        assert_eq!(joined[0].field_or_null("a.eff_start_date"), &FieldValue::Null);
        assert_eq!(
            joined[0].field_or_null("customer"),
            &FieldValue::String("2".to_string())
        );
    }

    #[test]
    fn test_empty_right_relation_degenerates_to_null_matches() {
        let processor =
            IntervalJoinProcessor::new(IntervalJoinConfig::new("a", address_schema()));

        let left = vec![
            left_row("1", d(2020, 1, 1), d(2020, 12, 31)),
            left_row("2", d(2021, 1, 1), d(2021, 12, 31)),
        ];

        let joined = processor.left_outer_join(&left, &[]);
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|r| r.field_or_null("a.address").is_null()));
    }

    #[test]
    fn test_null_left_date_still_emits_outer_row() {
        let processor =
            IntervalJoinProcessor::new(IntervalJoinConfig::new("a", address_schema()));

        // Unparseable start date became null upstream; the row must survive
        let left = vec![left_row("1", FieldValue::Null, d(2020, 12, 31))];
        let right = vec![right_row("1", "A1", d(2020, 1, 1), d(2020, 12, 31))];

        let joined = processor.left_outer_join(&left, &right);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].field_or_null("a.address"), &FieldValue::Null);
    }

    #[test]
    fn test_cascade_alias_keeps_left_interval_readable() {
        // After joining with alias "a", the left interval is still present
        // under its original name for the next cascade step to read.
        let processor =
            IntervalJoinProcessor::new(IntervalJoinConfig::new("a", address_schema()));

        let left = vec![left_row("1", d(2020, 1, 1), d(2020, 12, 31))];
        let right = vec![right_row("1", "A1", d(2020, 1, 1), d(2020, 6, 30))];

        let joined = processor.left_outer_join(&left, &right);
        assert_eq!(joined[0].field_or_null("eff_start_date"), &d(2020, 1, 1));
        assert_eq!(joined[0].field_or_null("eff_end_date"), &d(2020, 12, 31));
        assert_eq!(joined[0].field_or_null("a.eff_end_date"), &d(2020, 6, 30));
    }
}
