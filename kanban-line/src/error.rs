//! Error types for the kanban line engine

use thiserror::Error;

/// Result type for kanban line operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban line operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Pre-write validation failure. Nothing is persisted when this is
    /// returned; overlap messages enumerate every offending status and the
    /// column that already holds it.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Line not found
    #[error("kanban line not found: {id}")]
    LineNotFound { id: String },

    /// Column not found
    #[error("kanban column not found: {id}")]
    ColumnNotFound { id: String },

    /// Status not found
    #[error("status not found: {id}")]
    StatusNotFound { id: String },

    /// Lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}
