//! # kanban-line
//!
//! A file-backed kanban column assignment and ordering engine.
//!
//! A *line* is a board: it owns an ordered set of columns, each of which
//! claims a disjoint subset of the scope's workflow statuses. The engine
//! keeps three invariants on every line:
//!
//! - column orders are contiguous `1..N` after any mutating operation
//! - each workflow status maps to at most one column
//! - at most one column is the default landing column
//!
//! Status overlap is rejected up front when saving a column; the default
//! flag and any overlap introduced by the save itself are corrected after
//! the fact by stripping the sibling columns.
//!
//! ## Storage
//!
//! Everything lives under a `.kanban/` directory:
//!
//! ```text
//! .kanban/
//! ├── lines/
//! │   └── {line_id}.json       # line metadata
//! ├── columns/
//! │   └── {column_id}.json     # one file per column
//! ├── statuses/
//! │   └── {status_id}.json     # workflow status records
//! ├── activity/
//! │   └── current.jsonl        # append-only audit log
//! └── .lock                    # advisory lock file
//! ```
//!
//! Writes are atomic (temp file + rename) and every operation run through
//! [`KanbanOperationProcessor`] holds the advisory lock, so concurrent
//! processes see whole operations or nothing. Between a column write and
//! its sibling corrections there is a window where a crashed process can
//! leave two defaults or an overlap on disk; the next save of any column
//! on that line repairs it.
//!
//! ## Example
//!
//! ```no_run
//! use kanban_line::{KanbanContext, KanbanOperationProcessor};
//! use kanban_line::column::SaveColumn;
//! use kanban_line::types::{Column, Line, ScopeId};
//!
//! # async fn example() -> Result<(), kanban_line::KanbanError> {
//! let ctx = KanbanContext::new(".kanban");
//! let line = ctx.save_line(Line::new("Scrum Board", ScopeId::new())).await?;
//!
//! let processor = KanbanOperationProcessor::with_actor("alice");
//! let op = SaveColumn::new(Column::new("In Progress", line.id.clone()));
//! let saved = processor.process(&ctx, &op).await?;
//! println!("saved column {}", saved["id"]);
//! # Ok(())
//! # }
//! ```

pub mod auto_color;
pub mod column;
mod context;
pub mod enforce;
mod error;
pub mod line;
pub mod ops;
pub mod ordering;
mod processor;
pub mod registry;
pub mod types;
pub mod validate;

pub use context::{KanbanContext, KanbanLock};
pub use error::{KanbanError, Result};
pub use ops::{async_trait, Execute, ExecutionResult, Operation};
pub use processor::KanbanOperationProcessor;
