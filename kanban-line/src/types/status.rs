//! Workflow status type
//!
//! Statuses are owned by a scope and only *referenced* by columns. This
//! engine never mutates them; it compares them by ID.

use super::ids::{ScopeId, StatusId};
use serde::{Deserialize, Serialize};

/// A workflow state value (e.g. "To Do", "In Review")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    pub id: StatusId,
    pub name: String,
    /// Owning company/project scope
    pub scope: ScopeId,
}

impl Status {
    /// Create a new status with a fresh ULID
    pub fn new(name: impl Into<String>, scope: ScopeId) -> Self {
        Self {
            id: StatusId::new(),
            name: name.into(),
            scope,
        }
    }
}
