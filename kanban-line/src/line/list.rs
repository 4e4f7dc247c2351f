//! ListLines command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::ScopeId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List all lines in a scope, most recently updated first
#[derive(Debug, Deserialize, Serialize)]
pub struct ListLines {
    pub scope: ScopeId,
}

impl ListLines {
    pub fn new(scope: impl Into<ScopeId>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Operation for ListLines {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "line"
    }
    fn description(&self) -> &'static str {
        "List all kanban lines in a scope"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListLines {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result = async {
            let mut lines: Vec<_> = ctx
                .read_all_lines()
                .await?
                .into_iter()
                .filter(|l| l.scope == self.scope)
                .collect();
            lines.sort_by(|a, b| {
                b.updated_at
                    .cmp(&a.updated_at)
                    .then_with(|| a.name.cmp(&b.name))
            });

            let count = lines.len();
            Ok(json!({
                "lines": lines,
                "count": count,
            }))
        }
        .await;

        match result {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
