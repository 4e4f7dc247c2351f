//! GetColumn command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::ColumnId;
use serde::Deserialize;
use serde_json::Value;

/// Get a column by ID
#[derive(Debug, Deserialize)]
pub struct GetColumn {
    /// The column ID to retrieve
    pub id: ColumnId,
}

impl GetColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetColumn {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "column"
    }
    fn description(&self) -> &'static str {
        "Get a column by ID"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        match async {
            let column = ctx.read_column(&self.id).await?;
            Ok(serde_json::to_value(&column)?)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, Line, ScopeId};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_column() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join(".kanban"));
        ctx.create_directories().await.unwrap();
        let line = ctx
            .save_line(Line::new("Board", ScopeId::new()))
            .await
            .unwrap();
        let saved = ctx
            .save_column(Column::new("To Do", line.id))
            .await
            .unwrap();

        let result = GetColumn::new(saved.id.unwrap())
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["name"], "To Do");
    }

    #[tokio::test]
    async fn test_get_missing_column() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join(".kanban"));
        ctx.create_directories().await.unwrap();

        let result = GetColumn::new("ghost").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));
    }
}
