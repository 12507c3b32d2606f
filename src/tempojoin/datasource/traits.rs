//! Generic data source abstraction traits
//!
//! These traits provide a generic interface for any data source or sink,
//! independent of the join engine. Readers hand the engine materialized
//! record batches; writers consume the engine's output relation.

use async_trait::async_trait;
use std::error::Error;

use crate::tempojoin::engine::types::TemporalRecord;

/// Core trait for data input sources
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Create a reader for this source
    async fn create_reader(&self) -> Result<Box<dyn DataReader>, Box<dyn Error + Send + Sync>>;
}

/// Core trait for data output sinks
#[async_trait]
pub trait DataSink: Send + Sync {
    /// Create a writer for this sink
    async fn create_writer(&self) -> Result<Box<dyn DataWriter>, Box<dyn Error + Send + Sync>>;
}

/// Reader trait for consuming data from any source
#[async_trait]
pub trait DataReader: Send + Sync {
    /// Read the next batch of records
    ///
    /// Returns an empty vector when no more data is available.
    async fn read(&mut self) -> Result<Vec<TemporalRecord>, Box<dyn Error + Send + Sync>>;

    /// Check if more data is available
    async fn has_more(&self) -> Result<bool, Box<dyn Error + Send + Sync>>;
}

/// Writer trait for publishing data to any sink
#[async_trait]
pub trait DataWriter: Send + Sync {
    /// Write a single record to the sink
    async fn write(&mut self, record: TemporalRecord) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write multiple records in a batch
    async fn write_batch(
        &mut self,
        records: Vec<TemporalRecord>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered writes
    async fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;
}
