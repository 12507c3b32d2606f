//! File datasource error types

/// Errors raised by the file data source and sink
#[derive(Debug, thiserror::Error)]
pub enum FileDataSourceError {
    /// Underlying filesystem failure
    #[error("File I/O error: {0}")]
    IoError(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Format not supported for the attempted operation
    #[error("Unsupported file format '{0}' for this operation")]
    UnsupportedFormat(String),
}

impl From<std::io::Error> for FileDataSourceError {
    fn from(err: std::io::Error) -> Self {
        FileDataSourceError::IoError(err.to_string())
    }
}
