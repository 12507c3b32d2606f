//! Data source and sink abstractions.
//!
//! The join engine is fed by and drains into these seams; the engine itself
//! never touches the filesystem. The only implementation today is the file
//! datasource (header-bearing delimited text), which is all the one-shot
//! batch job needs.

pub mod file;
pub mod traits;

pub use traits::{DataReader, DataSink, DataSource, DataWriter};
