//! ListColumns command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::LineId;
use serde::Deserialize;
use serde_json::Value;

/// List a line's columns in display order
#[derive(Debug, Deserialize)]
pub struct ListColumns {
    /// The owning line
    pub line: LineId,
}

impl ListColumns {
    pub fn new(line: impl Into<LineId>) -> Self {
        Self { line: line.into() }
    }
}

impl Operation for ListColumns {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "columns"
    }
    fn description(&self) -> &'static str {
        "List a line's columns ordered by position"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        match async {
            let columns = ctx.find_columns_by_line(&self.line).await?;
            let count = columns.len();

            Ok(serde_json::json!({
                "columns": columns,
                "count": count
            }))
        }
        .await
        {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
