//! # tempojoin
//!
//! A temporal interval-join engine for time-versioned customer history.
//!
//! Three input relations — department, address, and mobile-number history —
//! each carry an effective date range per row. The engine cascades two
//! left-outer interval joins (department⋈address, then result⋈mobile),
//! matching rows on customer identity plus date-range overlap, and derives
//! the intersected validity window for every output combination.
//!
//! ## Pipeline
//!
//! ```text
//! CSV source ──► normalize dates ──► join dept⋈addr ──► join ⋈mobile ──► intersect + project ──► CSV sink
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tempojoin::tempojoin::engine::pipeline::TemporalJoinPipeline;
//! use tempojoin::tempojoin::engine::types::{FieldValue, TemporalRecord};
//!
//! let department = vec![TemporalRecord::from_pairs(vec![
//!     ("customer", FieldValue::String("1".to_string())),
//!     ("department", FieldValue::String("Sales".to_string())),
//!     ("active", FieldValue::String("true".to_string())),
//!     ("eff_start_date", FieldValue::String("2020-01-01".to_string())),
//!     ("eff_end_date", FieldValue::String("2020-12-31".to_string())),
//! ])];
//!
//! let pipeline = TemporalJoinPipeline::new();
//! let result = pipeline.execute(department, Vec::new(), Vec::new()).unwrap();
//! assert_eq!(result.len(), 1);
//! ```

pub mod tempojoin;

// Re-export main API at crate root for easy access
pub use tempojoin::engine::error::JoinError;
pub use tempojoin::engine::join::{IntervalJoinConfig, IntervalJoinProcessor};
pub use tempojoin::engine::pipeline::TemporalJoinPipeline;
pub use tempojoin::engine::types::{FieldValue, TemporalRecord};
