//! Pipeline error types.
//!
//! Only structural problems are errors here. Recovered conditions travel as
//! data instead: an unparseable date cell becomes `FieldValue::Null`, and a
//! left row with no overlapping right row gets a null-filled right side.

/// Fatal errors raised by the temporal join pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JoinError {
    /// A required column is missing from an input relation
    ///
    /// Raised by validation before any join executes; a run that fails here
    /// produces no output relation at all.
    #[error("Schema error in relation '{relation}': missing required column '{column}'")]
    SchemaError { relation: String, column: String },

    /// Internal stage failure during pipeline execution
    #[error("Execution error: {message}")]
    ExecutionError { message: String },
}

impl JoinError {
    /// Create a schema error for a missing column
    pub fn missing_column(relation: impl Into<String>, column: impl Into<String>) -> Self {
        Self::SchemaError {
            relation: relation.into(),
            column: column.into(),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::ExecutionError {
            message: message.into(),
        }
    }
}

/// Result type alias for pipeline operations
pub type JoinResult<T> = Result<T, JoinError>;
