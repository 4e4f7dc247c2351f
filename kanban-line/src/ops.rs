//! Operation traits and execution results
//!
//! Lifecycle operations are structs where the fields ARE the parameters.
//! Each operation implements [`Execute`] for the work and [`Operation`] for
//! its audit metadata; the processor decides what gets logged based on the
//! [`ExecutionResult`] variant.

pub use async_trait::async_trait;

use crate::types::LogEntry;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that mutate state and should be audited
/// - Unlogged: Read-only operations with no side effects
/// - Failed: Errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

/// Execute an operation against a context
#[async_trait]
pub trait Execute<C, E> {
    async fn execute(&self, ctx: &C) -> ExecutionResult<serde_json::Value, E>;
}

/// Audit metadata for an operation
pub trait Operation {
    /// The verb (e.g. "save")
    fn verb(&self) -> &'static str;

    /// The noun (e.g. "column")
    fn noun(&self) -> &'static str;

    /// One-line description of the operation
    fn description(&self) -> &'static str;

    /// Canonical "verb noun" string used in log entries
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}
