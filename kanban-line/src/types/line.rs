//! Kanban line (board) type

use super::column::Column;
use super::ids::{LineId, ScopeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A kanban line - the parent entity owning an ordered set of columns.
///
/// Only metadata is serialized into the line file; columns are stored as
/// individual files. The `columns` field is the in-memory attached
/// collection: columns placed there before any is persisted are written out
/// by the store's cascade save, and are visible to status-overlap validation
/// during batch setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning company/project scope
    pub scope: ScopeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Attached, possibly not-yet-persisted columns (cascade-saved)
    #[serde(default, skip)]
    pub columns: Vec<Column>,
}

impl Line {
    /// Create a new line in the given scope
    pub fn new(name: impl Into<String>, scope: ScopeId) -> Self {
        let now = Utc::now();
        Self {
            id: LineId::new(),
            name: name.into(),
            description: None,
            scope,
            created_at: now,
            updated_at: now,
            columns: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a column to this line's in-memory collection, fixing up its
    /// back-reference.
    pub fn attach_column(&mut self, mut column: Column) {
        column.line = self.id.clone();
        self.columns.push(column);
    }
}
