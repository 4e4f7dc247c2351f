//! InitLine command

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::types::{Line, LogEntry, ScopeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create a new kanban line in a scope
#[derive(Debug, Deserialize, Serialize)]
pub struct InitLine {
    /// The line name, unique within the scope case-insensitively
    pub name: String,
    /// The owning scope
    pub scope: ScopeId,
    /// Optional line description
    pub description: Option<String>,
}

impl InitLine {
    /// Create a new InitLine command
    pub fn new(name: impl Into<String>, scope: impl Into<ScopeId>) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Operation for InitLine {
    fn verb(&self) -> &'static str {
        "init"
    }
    fn noun(&self) -> &'static str {
        "line"
    }
    fn description(&self) -> &'static str {
        "Create a new kanban line in a scope"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for InitLine {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result = async {
            let name = self.name.trim();
            if name.is_empty() {
                return Err(KanbanError::validation("line name is required"));
            }

            let duplicate = ctx
                .read_all_lines()
                .await?
                .into_iter()
                .any(|l| l.scope == self.scope && l.name.trim().eq_ignore_ascii_case(name));
            if duplicate {
                return Err(KanbanError::validation(
                    "line name must be unique within the scope",
                ));
            }

            let mut line = Line::new(name, self.scope.clone());
            if let Some(desc) = &self.description {
                line = line.with_description(desc);
            }
            let line = ctx.save_line(line).await?;

            Ok(serde_json::to_value(&line)?)
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
