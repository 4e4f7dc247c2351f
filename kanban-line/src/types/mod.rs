//! Core types for the kanban line engine

mod column;
mod ids;
mod line;
mod log;
mod status;

// Re-export all types
pub use column::Column;
pub use ids::{ColumnId, LineId, LogEntryId, ScopeId, StatusId};
pub use line::Line;
pub use log::LogEntry;
pub use status::Status;
