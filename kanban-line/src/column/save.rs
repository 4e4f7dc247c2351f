//! SaveColumn command

use crate::context::KanbanContext;
use crate::enforce;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::{Column, LogEntry};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create or update a column.
///
/// A column without an identity is attached to its line and persisted
/// through the line's cascade save, then reloaded by name to pick up the
/// assigned identity; an existing column is saved directly. Validation runs
/// before any write; the default/exclusivity enforcer runs after.
#[derive(Debug, Deserialize, Serialize)]
pub struct SaveColumn {
    /// The column to persist
    pub column: Column,
}

impl SaveColumn {
    /// Create a new SaveColumn command
    pub fn new(column: Column) -> Self {
        Self { column }
    }
}

impl Operation for SaveColumn {
    fn verb(&self) -> &'static str {
        "save"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Create or update a column, enforcing line constraints"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for SaveColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result = async {
            ctx.ensure_directories().await?;
            let mut column = self.column.clone();

            if column.name.trim().is_empty() {
                return Err(KanbanError::validation("column name cannot be blank"));
            }
            // The line must already be persisted
            let mut line = ctx.read_line(&column.line).await?;

            validate::validate_column(ctx, &column, &line).await?;

            if column.order.map_or(true, |o| o <= 0) {
                column.order = Some(ctx.next_order(&line.id).await?);
            }

            let saved = if column.id.is_none() {
                // New column: persist through the owning line's cascade,
                // then reload by name to obtain the assigned identity.
                let name = column.name.trim().to_string();
                line.attach_column(column);
                let line = ctx.save_line(line).await?;
                ctx.find_column_by_line_and_name_ci(&line.id, &name)
                    .await?
                    .ok_or(KanbanError::ColumnNotFound { id: name })?
            } else {
                ctx.save_column(column).await?
            };

            enforce::apply_status_and_default_constraints(ctx, &saved).await?;

            Ok(serde_json::to_value(&saved)?)
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
