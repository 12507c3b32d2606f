//! File Sink Implementation
//!
//! Writes the output relation to a file as CSV (header-bearing, configured
//! column order) or JSON Lines. The default write mode is full-replace:
//! the destination is truncated when the writer opens, which is also what
//! makes a failed run atomic - validation errors happen before any writer
//! exists, so a failed run leaves no partial output.

use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use std::error::Error;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::tempojoin::datasource::traits::{DataSink, DataWriter};
use crate::tempojoin::engine::types::{FieldValue, TemporalRecord};

use super::config::{FileFormat, FileSinkConfig};
use super::error::FileDataSourceError;

/// File-based data sink
pub struct FileDataSink {
    config: FileSinkConfig,
}

impl FileDataSink {
    /// Create a sink for the configured file
    pub fn new(config: FileSinkConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &FileSinkConfig {
        &self.config
    }
}

#[async_trait]
impl DataSink for FileDataSink {
    async fn create_writer(&self) -> Result<Box<dyn DataWriter>, Box<dyn Error + Send + Sync>> {
        let writer = FileWriter::create(self.config.clone()).await?;
        Ok(Box::new(writer))
    }
}

/// Writer for one output file
pub struct FileWriter {
    config: FileSinkConfig,
    file: File,
    header_written: bool,
    records_written: u64,
}

impl FileWriter {
    /// Open the destination, truncating prior output unless appending
    pub async fn create(config: FileSinkConfig) -> Result<Self, FileDataSourceError> {
        if matches!(config.format, FileFormat::Csv) && config.columns.is_empty() {
            return Err(FileDataSourceError::ConfigurationError(
                "CSV sink requires an output column order".to_string(),
            ));
        }

        let file = if config.append_if_exists {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.path)
                .await?
        } else {
            File::create(&config.path).await?
        };

        Ok(Self {
            config,
            file,
            header_written: false,
            records_written: 0,
        })
    }

    /// Total records written so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Quote a CSV cell when it contains the delimiter, a quote, or a newline
    fn escape_csv_cell(&self, cell: &str) -> String {
        let needs_quoting = cell.contains(self.config.csv_delimiter)
            || cell.contains('"')
            || cell.contains('\n')
            || cell.contains('\r');
        if needs_quoting {
            format!("\"{}\"", cell.replace('"', "\"\""))
        } else {
            cell.to_string()
        }
    }

    /// Format one record as a CSV line in the configured column order
    fn format_csv_line(&self, record: &TemporalRecord) -> String {
        let delimiter = self.config.csv_delimiter.to_string();
        self.config
            .columns
            .iter()
            .map(|column| self.escape_csv_cell(&record.field_or_null(column).to_display_string()))
            .collect::<Vec<_>>()
            .join(&delimiter)
    }

    /// Format one record as a JSON Lines entry
    fn format_json_line(&self, record: &TemporalRecord) -> Result<String, FileDataSourceError> {
        let mut map = Map::new();
        for (name, value) in &record.fields {
            map.insert(name.clone(), field_value_to_json(value));
        }
        serde_json::to_string(&Value::Object(map))
            .map_err(|e| FileDataSourceError::IoError(e.to_string()))
    }

    async fn write_line(&mut self, line: &str) -> Result<(), FileDataSourceError> {
        self.file.write_all(line.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        Ok(())
    }
}

/// Convert a field value to its JSON representation
///
/// Dates serialize as YYYY-MM-DD strings; a non-finite float has no JSON
/// number form and degrades to null.
pub fn field_value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Integer(i) => Value::Number((*i).into()),
        FieldValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        FieldValue::Null => Value::Null,
    }
}

#[async_trait]
impl DataWriter for FileWriter {
    async fn write(&mut self, record: TemporalRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.write_batch(vec![record]).await
    }

    async fn write_batch(
        &mut self,
        records: Vec<TemporalRecord>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match self.config.format {
            FileFormat::Csv | FileFormat::CsvNoHeader => {
                if self.config.csv_has_header
                    && matches!(self.config.format, FileFormat::Csv)
                    && !self.header_written
                {
                    let delimiter = self.config.csv_delimiter.to_string();
                    let header = self
                        .config
                        .columns
                        .iter()
                        .map(|c| self.escape_csv_cell(c))
                        .collect::<Vec<_>>()
                        .join(&delimiter);
                    self.write_line(&header).await?;
                    self.header_written = true;
                }
                for record in &records {
                    let line = self.format_csv_line(record);
                    self.write_line(&line).await?;
                }
            }
            FileFormat::JsonLines => {
                for record in &records {
                    let line = self.format_json_line(record)?;
                    self.write_line(&line).await?;
                }
            }
        }

        self.records_written += records.len() as u64;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.file.flush().await?;
        Ok(())
    }
}
