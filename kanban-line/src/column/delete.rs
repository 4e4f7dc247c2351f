//! DeleteColumn command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::ordering;
use crate::types::{ColumnId, LogEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Delete a column through its owning line.
///
/// A column is never removed standalone: the owning line is resolved first,
/// the column is removed from it, the remaining siblings are re-normalized,
/// and the line is saved. This keeps cascade and ordering consistent.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteColumn {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Delete a column through its owning line"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let column = ctx.read_column(&self.id).await?;
            // Deletion is always mediated by the owning line
            let line = ctx.read_line(&column.line).await?;
            debug!(column = %column.name, line = %line.name, "deleting kanban column");

            ctx.delete_column_file(&self.id).await?;
            ordering::normalize_column_order(ctx, &line.id).await?;
            ctx.save_line(line).await?;

            Ok(serde_json::json!({
                "deleted": true,
                "id": self.id.to_string()
            }))
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
