//! Temporal join execution engine.
//!
//! The three core stages, in data-flow order:
//! - [`normalize`] - promote textual date cells to comparable calendar dates
//! - [`join`] - left-outer interval join, applied twice in a cascade
//! - [`intersect`] - derive the intersected validity window and project output columns
//!
//! [`pipeline`] wires the stages together and owns input validation.

pub mod error;
pub mod intersect;
pub mod join;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use error::JoinError;
pub use types::{FieldValue, TemporalRecord};
