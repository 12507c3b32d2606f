//! File-based data source and sink.
//!
//! Reads header-bearing delimited text into [`TemporalRecord`] batches and
//! writes the output relation back out, CSV or JSON Lines, with
//! full-replace (truncate-on-open) semantics by default.
//!
//! [`TemporalRecord`]: crate::tempojoin::engine::types::TemporalRecord

pub mod config;
pub mod data_sink;
pub mod error;
pub mod reader;

pub use config::{FileFormat, FileSinkConfig, FileSourceConfig};
pub use data_sink::{FileDataSink, FileWriter};
pub use error::FileDataSourceError;
pub use reader::{FileDataSource, FileReader};
