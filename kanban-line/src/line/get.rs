//! GetLine and GetDefaultLine commands

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::{LineId, ScopeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fetch a single line by ID
#[derive(Debug, Deserialize, Serialize)]
pub struct GetLine {
    pub id: LineId,
}

impl GetLine {
    pub fn new(id: impl Into<LineId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetLine {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "line"
    }
    fn description(&self) -> &'static str {
        "Fetch a single kanban line by ID"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetLine {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result = async {
            let line = ctx.read_line(&self.id).await?;
            Ok(serde_json::to_value(&line)?)
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

/// Fetch the default line for a scope: the most recently updated one.
///
/// Ties break toward the later creation time, then the larger ID, so the
/// result is stable across repeated calls.
#[derive(Debug, Deserialize, Serialize)]
pub struct GetDefaultLine {
    pub scope: ScopeId,
}

impl GetDefaultLine {
    pub fn new(scope: impl Into<ScopeId>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Operation for GetDefaultLine {
    fn verb(&self) -> &'static str {
        "get-default"
    }
    fn noun(&self) -> &'static str {
        "line"
    }
    fn description(&self) -> &'static str {
        "Fetch the most recently updated line in a scope"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetDefaultLine {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result = async {
            let line = ctx
                .read_all_lines()
                .await?
                .into_iter()
                .filter(|l| l.scope == self.scope)
                .max_by(|a, b| {
                    a.updated_at
                        .cmp(&b.updated_at)
                        .then(a.created_at.cmp(&b.created_at))
                        .then(a.id.as_str().cmp(b.id.as_str()))
                })
                .ok_or_else(|| KanbanError::LineNotFound {
                    id: format!("default line for scope {}", self.scope),
                })?;
            Ok(serde_json::to_value(&line)?)
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
