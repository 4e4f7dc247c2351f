//! Operation processor
//!
//! Runs a command under the storage lock, writes the audit entry for
//! anything the command says to log, and hands the caller the plain
//! `Result`. A failed audit append never fails the operation that already
//! committed.

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::Execute;
use serde_json::Value;
use tracing::{debug, warn};

/// Executes operations against a [`KanbanContext`], appending audit entries
/// to the activity log.
#[derive(Debug, Clone, Default)]
pub struct KanbanOperationProcessor {
    /// Attributed to every log entry this processor writes
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    /// Create a processor with no actor attribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor whose log entries carry the given actor
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    /// Execute an operation, holding the storage lock for the duration.
    ///
    /// The lock serializes whole operations, so read-modify-write sequences
    /// inside a command see a stable store.
    pub async fn process<Op>(&self, ctx: &KanbanContext, op: &Op) -> Result<Value, KanbanError>
    where
        Op: Execute<KanbanContext, KanbanError> + Sync,
    {
        ctx.ensure_directories().await?;
        let _lock = ctx.lock().await?;

        let (result, log_entry) = op.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            debug!(op = %entry.op, duration_ms = entry.duration_ms, "recording activity");
            if let Err(e) = ctx.append_activity(&entry).await {
                // The mutation already landed; losing the audit line is
                // worth a warning, not a failed operation.
                warn!(op = %entry.op, error = %e, "failed to append activity entry");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{GetColumn, SaveColumn};
    use crate::types::{Column, Line, ScopeId};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, KanbanContext) {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join(".kanban"));
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_process_logs_mutations() {
        let (_temp, ctx) = setup().await;
        let line = ctx
            .save_line(Line::new("Board", ScopeId::new()))
            .await
            .unwrap();

        let processor = KanbanOperationProcessor::with_actor("tester");
        let op = SaveColumn::new(Column::new("To Do", line.id.clone()));
        let value = processor.process(&ctx, &op).await.unwrap();
        assert_eq!(value["name"], "To Do");

        let activity = ctx.read_activity(None).await.unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].op, "save column");
        assert_eq!(activity[0].actor.as_deref(), Some("tester"));
    }

    #[tokio::test]
    async fn test_process_skips_logging_reads() {
        let (_temp, ctx) = setup().await;
        let mut line = Line::new("Board", ScopeId::new());
        line.attach_column(Column::new("To Do", line.id.clone()).with_order(1));
        let line = ctx.save_line(line).await.unwrap();
        let column_id = ctx.find_columns_by_line(&line.id).await.unwrap()[0]
            .id
            .clone()
            .unwrap();

        let processor = KanbanOperationProcessor::new();
        processor
            .process(&ctx, &GetColumn::new(column_id))
            .await
            .unwrap();

        assert!(ctx.read_activity(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_logs_failures() {
        let (_temp, ctx) = setup().await;

        let processor = KanbanOperationProcessor::new();
        let op = SaveColumn::new(Column::new("Ghost", "no-such-line".into()));
        let err = processor.process(&ctx, &op).await.unwrap_err();
        assert!(matches!(err, KanbanError::LineNotFound { .. }));

        let activity = ctx.read_activity(None).await.unwrap();
        assert_eq!(activity.len(), 1);
        assert!(activity[0].output["error"].is_string());
    }
}
