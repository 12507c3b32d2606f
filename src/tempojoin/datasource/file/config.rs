//! File Data Source Configuration

use serde::{Deserialize, Serialize};

/// Supported file formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FileFormat {
    /// CSV files with header row
    #[default]
    Csv,
    /// CSV files without header row (fields named by column index)
    CsvNoHeader,
    /// JSON Lines format (newline-delimited JSON), sink only
    JsonLines,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::CsvNoHeader => write!(f, "csv_no_header"),
            FileFormat::JsonLines => write!(f, "jsonl"),
        }
    }
}

impl std::str::FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "csv_no_header" | "csvnoheader" => Ok(FileFormat::CsvNoHeader),
            "jsonl" | "jsonlines" | "json_lines" => Ok(FileFormat::JsonLines),
            _ => Err(format!("Unknown file format: {}", s)),
        }
    }
}

/// Configuration for file-based data sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSourceConfig {
    /// Input file path
    pub path: String,

    /// File format
    pub format: FileFormat,

    /// CSV delimiter character
    pub csv_delimiter: char,

    /// CSV quote character
    pub csv_quote: char,

    /// Records per read() batch
    pub batch_size: usize,

    /// Maximum number of records to read (None = unlimited)
    pub max_records: Option<usize>,
}

impl FileSourceConfig {
    /// Create a config with default CSV settings
    pub fn new(path: impl Into<String>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
            csv_delimiter: ',',
            csv_quote: '"',
            batch_size: 1024,
            max_records: None,
        }
    }

    /// Set the CSV delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Cap the number of records read
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }
}

/// Configuration for file-based data sinks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Output file path
    pub path: String,

    /// File format
    pub format: FileFormat,

    /// CSV delimiter character
    pub csv_delimiter: char,

    /// Whether to emit a CSV header row
    pub csv_has_header: bool,

    /// Append to an existing file instead of replacing it
    ///
    /// The default is full-replace: the destination is truncated when the
    /// writer opens, so a prior output relation is discarded, not extended.
    pub append_if_exists: bool,

    /// Output column order (required for CSV output)
    pub columns: Vec<String>,
}

impl FileSinkConfig {
    /// Create a config with default CSV settings
    pub fn new(path: impl Into<String>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
            csv_delimiter: ',',
            csv_has_header: true,
            append_if_exists: false,
            columns: Vec::new(),
        }
    }

    /// Set the output column order
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Set the CSV delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    /// Append instead of replacing prior output
    pub fn with_append(mut self, append: bool) -> Self {
        self.append_if_exists = append;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        for format in [FileFormat::Csv, FileFormat::CsvNoHeader, FileFormat::JsonLines] {
            assert_eq!(format.to_string().parse::<FileFormat>().unwrap(), format);
        }
        assert!("parquet".parse::<FileFormat>().is_err());
    }

    #[test]
    fn test_sink_defaults_to_full_replace() {
        let config = FileSinkConfig::new("/tmp/out.csv", FileFormat::Csv);
        assert!(!config.append_if_exists);
        assert!(config.csv_has_header);
    }
}
