//! DeleteLine command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::{LineId, LogEntry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a line and all columns it owns
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteLine {
    pub id: LineId,
}

impl DeleteLine {
    pub fn new(id: impl Into<LineId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteLine {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "line"
    }
    fn description(&self) -> &'static str {
        "Delete a kanban line and its columns"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteLine {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            // Confirm existence first so a miss reports LineNotFound
            let line = ctx.read_line(&self.id).await?;
            let columns = ctx.find_columns_by_line(&line.id).await?;
            ctx.delete_line(&line.id).await?;

            Ok(json!({
                "deleted": true,
                "id": line.id,
                "columns_deleted": columns.len(),
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
