//! Error types for the task board

use crate::types::ColumnName;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Input rejected before any state change (missing or invalid field)
    #[error("rejected {field}: {reason}")]
    ValidationRejected { field: String, reason: String },

    /// Positional address outside the column
    #[error("index {index} out of range for column '{column}' with {len} tasks")]
    IndexOutOfRange {
        column: ColumnName,
        index: usize,
        len: usize,
    },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Persisted board data could not be used
    #[error("malformed board data: {message}")]
    Malformed { message: String },

    /// Lock is held by another process
    #[error("lock busy - another write in progress")]
    LockBusy,

    /// Configuration could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a rejection for a required field that was not provided
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::ValidationRejected {
            field: field.into(),
            reason: "required".into(),
        }
    }

    /// Create a rejection for a field whose value is not acceptable
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationRejected {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-data error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }

    /// Check if the caller should re-prompt for input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationRejected { .. })
    }
}
