//! ULID-based ID newtypes for all entities
//!
//! IDs are stored as strings so that externally assigned identifiers (e.g.
//! from imported configurations) round-trip unchanged. `new()` always
//! generates a fresh ULID.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! ulid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-backed ID
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing string identifier
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

ulid_id!(
    /// Identifies a kanban line (board)
    LineId
);
ulid_id!(
    /// Identifies a column within a line
    ColumnId
);
ulid_id!(
    /// Identifies a workflow status
    StatusId
);
ulid_id!(
    /// Identifies the owning scope (company/project) of lines and statuses
    ScopeId
);
ulid_id!(
    /// Identifies an activity log entry
    LogEntryId
);
