//! Column type
//!
//! A column is a named bucket mapping a disjoint subset of the line's
//! workflow statuses. It carries a non-owning `line` back-reference (ID only,
//! resolved through the store) and gains its own identity on first persist.

use super::ids::{ColumnId, LineId, StatusId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column of a kanban line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    /// None until the store has persisted the column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ColumnId>,
    /// Owning line, by ID - never a live back-pointer
    pub line: LineId,
    /// Display name, unique per line case-insensitively
    pub name: String,
    /// `#rrggbb` display color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Display order. Positive and contiguous per line once normalized;
    /// None or non-positive means "assign the next free position on save".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Catch-all column for items whose status is not mapped anywhere
    #[serde(default)]
    pub is_default: bool,
    /// Work-in-progress limit (non-negative)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<i32>,
    #[serde(default)]
    pub wip_limit_enabled: bool,
    /// Statuses included in this column, referenced by ID
    #[serde(default)]
    pub statuses: Vec<StatusId>,
    /// Opaque marker consumed by the UI layer; never interpreted here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_class: Option<String>,
}

impl Column {
    /// Create a new, unpersisted column attached to a line
    pub fn new(name: impl Into<String>, line: LineId) -> Self {
        Self {
            id: None,
            line,
            name: name.into(),
            color: None,
            order: None,
            is_default: false,
            wip_limit: None,
            wip_limit_enabled: false,
            statuses: Vec::new(),
            service_class: None,
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set an explicit display order
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Add an included status
    pub fn with_status(mut self, status: impl Into<StatusId>) -> Self {
        self.statuses.push(status.into());
        self
    }

    /// Replace the included statuses
    pub fn with_statuses(mut self, statuses: Vec<StatusId>) -> Self {
        self.statuses = statuses;
        self
    }

    /// Mark this column as the line's default (catch-all) column
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Set the WIP limit without enabling it
    pub fn with_wip_limit(mut self, limit: i32) -> Self {
        self.wip_limit = Some(limit);
        self
    }

    /// Enable or disable WIP limit checking
    pub fn with_wip_limit_enabled(mut self, enabled: bool) -> Self {
        self.wip_limit_enabled = enabled;
        self
    }

    /// Whether the store has assigned this column an identity
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Included status IDs as a set, for overlap computations
    pub fn status_id_set(&self) -> HashSet<&StatusId> {
        self.statuses.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_is_unpersisted() {
        let column = Column::new("To Do", LineId::from_string("line-1"));
        assert!(!column.is_persisted());
        assert!(column.order.is_none());
        assert!(!column.is_default);
        assert!(column.statuses.is_empty());
    }

    #[test]
    fn test_builders() {
        let column = Column::new("Done", LineId::new())
            .with_color("#0e8a16")
            .with_order(3)
            .with_status("done")
            .with_status("cancelled")
            .as_default()
            .with_wip_limit(5)
            .with_wip_limit_enabled(true);

        assert_eq!(column.color.as_deref(), Some("#0e8a16"));
        assert_eq!(column.order, Some(3));
        assert_eq!(column.statuses.len(), 2);
        assert!(column.is_default);
        assert_eq!(column.wip_limit, Some(5));
        assert!(column.wip_limit_enabled);
    }

    #[test]
    fn test_status_id_set() {
        let column = Column::new("Doing", LineId::new())
            .with_status("a")
            .with_status("b");
        let set = column.status_id_set();
        assert!(set.contains(&StatusId::from_string("a")));
        assert!(!set.contains(&StatusId::from_string("c")));
    }

    #[test]
    fn test_serialization_skips_unset_fields() {
        let column = Column::new("To Do", LineId::from_string("line-1"));
        let json = serde_json::to_string(&column).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("\"color\""));
        assert!(!json.contains("\"wip_limit\""));
    }
}
