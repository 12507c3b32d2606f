//! File Source Implementation
//!
//! Reads header-bearing delimited text into [`TemporalRecord`] batches.
//! Every cell loads as a string field; an empty cell becomes
//! [`FieldValue::Null`]. No further type inference happens here - date
//! promotion is the normalizer's job, and anything beyond that is out of
//! scope for the join pipeline.

use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::tempojoin::datasource::traits::{DataReader, DataSource};
use crate::tempojoin::engine::types::{FieldValue, TemporalRecord};

use super::config::{FileFormat, FileSourceConfig};
use super::error::FileDataSourceError;

/// File-based data source
pub struct FileDataSource {
    config: FileSourceConfig,
}

impl FileDataSource {
    /// Create a source for the configured file
    pub fn new(config: FileSourceConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &FileSourceConfig {
        &self.config
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn create_reader(&self) -> Result<Box<dyn DataReader>, Box<dyn Error + Send + Sync>> {
        let reader = FileReader::open(self.config.clone())?;
        Ok(Box::new(reader))
    }
}

/// Reader over one delimited text file
pub struct FileReader {
    config: FileSourceConfig,
    reader: BufReader<File>,
    headers: Option<Vec<String>>,
    records_read: usize,
    finished: bool,
}

impl FileReader {
    /// Open the configured file for reading
    pub fn open(config: FileSourceConfig) -> Result<Self, FileDataSourceError> {
        match config.format {
            FileFormat::Csv | FileFormat::CsvNoHeader => {}
            other => return Err(FileDataSourceError::UnsupportedFormat(other.to_string())),
        }

        let file = File::open(&config.path)?;
        Ok(Self {
            config,
            reader: BufReader::new(file),
            headers: None,
            records_read: 0,
            finished: false,
        })
    }

    /// RFC 4180 field parsing: quoted fields may contain the delimiter, and
    /// a doubled quote inside quotes is a literal quote
    fn parse_csv_fields(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current_field = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                c if c == self.config.csv_quote => {
                    if in_quotes {
                        if chars.peek() == Some(&self.config.csv_quote) {
                            current_field.push(self.config.csv_quote);
                            chars.next();
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        in_quotes = true;
                    }
                }
                c if c == self.config.csv_delimiter && !in_quotes => {
                    fields.push(current_field.trim().to_string());
                    current_field.clear();
                }
                c => {
                    current_field.push(c);
                }
            }
        }

        fields.push(current_field.trim().to_string());
        fields
    }

    /// Build a record from parsed fields, naming them from the header row or
    /// by column index
    fn record_from_fields(&self, parsed: Vec<String>) -> TemporalRecord {
        let mut fields = HashMap::new();
        for (i, value) in parsed.into_iter().enumerate() {
            let name = match &self.headers {
                Some(headers) => headers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{}", i)),
                None => format!("column_{}", i),
            };
            let field_value = if value.is_empty() {
                FieldValue::Null
            } else {
                FieldValue::String(value)
            };
            fields.insert(name, field_value);
        }
        TemporalRecord::new(fields)
    }
}

#[async_trait]
impl DataReader for FileReader {
    async fn read(&mut self) -> Result<Vec<TemporalRecord>, Box<dyn Error + Send + Sync>> {
        let mut batch = Vec::new();

        while batch.len() < self.config.batch_size && !self.finished {
            if let Some(max) = self.config.max_records {
                if self.records_read >= max {
                    self.finished = true;
                    break;
                }
            }

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.finished = true;
                }
                Ok(_) => {
                    let content = line.trim_end_matches(['\n', '\r']);
                    if content.is_empty() {
                        continue;
                    }

                    if self.headers.is_none() && self.config.format == FileFormat::Csv {
                        self.headers = Some(self.parse_csv_fields(content));
                        continue;
                    }

                    let parsed = self.parse_csv_fields(content);
                    batch.push(self.record_from_fields(parsed));
                    self.records_read += 1;
                }
                Err(e) => return Err(Box::new(FileDataSourceError::from(e))),
            }
        }

        Ok(batch)
    }

    async fn has_more(&self) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Ok(!self.finished)
    }
}
