//! MoveColumnUp / MoveColumnDown commands
//!
//! Both normalize the line's order first, then swap the target with its
//! neighbor. Moving the first column up or the last column down is a silent
//! no-op.

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::ordering;
use crate::types::{Column, ColumnId, LogEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Move a column one position towards the front of its line
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveColumnUp {
    /// The column ID to move
    pub id: ColumnId,
}

impl MoveColumnUp {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for MoveColumnUp {
    fn verb(&self) -> &'static str {
        "move-up"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Move a column one position up within its line"
    }
}

/// Move a column one position towards the back of its line
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveColumnDown {
    /// The column ID to move
    pub id: ColumnId,
}

impl MoveColumnDown {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for MoveColumnDown {
    fn verb(&self) -> &'static str {
        "move-down"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Move a column one position down within its line"
    }
}

/// Swap the target column with the neighbor at `offset` in the normalized
/// sequence, persisting both. Returns the target unchanged when no neighbor
/// exists in that direction.
async fn swap_with_neighbor(
    ctx: &KanbanContext,
    id: &ColumnId,
    offset: isize,
) -> Result<Column> {
    let column = ctx.read_column(id).await?;
    let items = ordering::normalize_column_order(ctx, &column.line).await?;

    let position = items
        .iter()
        .position(|c| c.id.as_ref() == Some(id))
        .ok_or(KanbanError::ColumnNotFound { id: id.to_string() })?;

    let neighbor_position = position as isize + offset;
    if neighbor_position < 0 || neighbor_position as usize >= items.len() {
        // Already at the boundary
        return Ok(items[position].clone());
    }

    let mut current = items[position].clone();
    let mut neighbor = items[neighbor_position as usize].clone();
    std::mem::swap(&mut current.order, &mut neighbor.order);

    let current = ctx.save_column(current).await?;
    ctx.save_column(neighbor).await?;
    Ok(current)
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveColumnUp {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let moved = swap_with_neighbor(ctx, &self.id, -1).await?;
            Ok(serde_json::to_value(&moved)?)
        }
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(value) => ExecutionResult::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(self.op_string(), input, value, None, duration_ms),
            },
            Err(error) => {
                let error_msg = error.to_string();
                ExecutionResult::Failed {
                    error,
                    log_entry: Some(LogEntry::failure(
                        self.op_string(),
                        input,
                        &error_msg,
                        duration_ms,
                    )),
                }
            }
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveColumnDown {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let moved = swap_with_neighbor(ctx, &self.id, 1).await?;
            Ok(serde_json::to_value(&moved)?)
        }
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(value) => ExecutionResult::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(self.op_string(), input, value, None, duration_ms),
            },
            Err(error) => {
                let error_msg = error.to_string();
                ExecutionResult::Failed {
                    error,
                    log_entry: Some(LogEntry::failure(
                        self.op_string(),
                        input,
                        &error_msg,
                        duration_ms,
                    )),
                }
            }
        }
    }
}
