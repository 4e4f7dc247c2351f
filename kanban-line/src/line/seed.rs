//! SeedSampleLines command
//!
//! Builds two ready-to-use boards for a scope by looking workflow statuses
//! up by name. Missing statuses are skipped with a warning, columns that end
//! up empty are dropped, and a line whose columns all drop falls back to a
//! single default "All Items" column holding every scope status. A scope
//! with no statuses at all is left untouched.

use crate::context::KanbanContext;
use crate::error::KanbanError;
use crate::ops::{async_trait, Execute, ExecutionResult, Operation};
use crate::registry::StatusRegistry;
use crate::types::{Column, Line, LogEntry, ScopeId, Status};
use crate::validate::validate_column;
use crate::auto_color::auto_color;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Column blueprint: display name plus the status names it should hold.
struct ColumnPlan {
    name: &'static str,
    statuses: &'static [&'static str],
    default: bool,
}

struct LinePlan {
    name: &'static str,
    description: &'static str,
    columns: &'static [ColumnPlan],
}

const SAMPLE_LINES: &[LinePlan] = &[
    LinePlan {
        name: "Scrum Board",
        description: "Classic Scrum workflow from intake to done",
        columns: &[
            ColumnPlan { name: "To Do", statuses: &["Not Started"], default: false },
            ColumnPlan { name: "In Progress", statuses: &["In Progress"], default: false },
            ColumnPlan { name: "Review", statuses: &["In Review", "On Hold"], default: false },
            ColumnPlan { name: "Done", statuses: &["Completed"], default: true },
            ColumnPlan { name: "Cancelled", statuses: &["Cancelled"], default: false },
        ],
    },
    LinePlan {
        name: "Simple Kanban",
        description: "Simplified three-column task board",
        columns: &[
            ColumnPlan { name: "To Do", statuses: &["Not Started"], default: false },
            ColumnPlan { name: "Doing", statuses: &["In Progress", "On Hold", "In Review"], default: false },
            ColumnPlan { name: "Done", statuses: &["Completed", "Cancelled"], default: true },
        ],
    },
];

/// Seed the sample boards for a scope
#[derive(Debug, Deserialize, Serialize)]
pub struct SeedSampleLines {
    pub scope: ScopeId,
}

impl SeedSampleLines {
    pub fn new(scope: impl Into<ScopeId>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Operation for SeedSampleLines {
    fn verb(&self) -> &'static str {
        "seed"
    }
    fn noun(&self) -> &'static str {
        "line"
    }
    fn description(&self) -> &'static str {
        "Seed sample kanban lines and columns for a scope"
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for SeedSampleLines {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result = seed_sample_lines(ctx, &self.scope).await;

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

async fn seed_sample_lines(
    ctx: &KanbanContext,
    scope: &ScopeId,
) -> Result<Value, KanbanError> {
    let registry = StatusRegistry::new(ctx);
    let scope_statuses = registry.statuses_for_scope(scope).await?;
    if scope_statuses.is_empty() {
        warn!(scope = %scope, "no statuses in scope, skipping sample seeding");
        return Ok(json!({ "seeded": false, "lines": [] }));
    }

    let mut seeded = Vec::new();
    for plan in SAMPLE_LINES {
        let line = build_line(ctx, scope, plan, &scope_statuses).await?;
        let line = ctx.save_line(line).await?;
        info!(
            line = %line.name,
            columns = line.columns.len(),
            "seeded sample kanban line"
        );
        seeded.push(line);
    }

    let count = seeded.len();
    Ok(json!({
        "seeded": true,
        "lines": seeded,
        "count": count,
    }))
}

/// Assemble one line from its blueprint, attaching only columns that
/// resolved at least one status.
async fn build_line(
    ctx: &KanbanContext,
    scope: &ScopeId,
    plan: &LinePlan,
    scope_statuses: &[Status],
) -> Result<Line, KanbanError> {
    let registry = StatusRegistry::new(ctx);
    let mut line = Line::new(plan.name, scope.clone()).with_description(plan.description);

    for column_plan in plan.columns {
        let mut column = Column::new(column_plan.name, line.id.clone())
            .with_color(auto_color(column_plan.name));
        if column_plan.default {
            column = column.as_default();
        }

        for status_name in column_plan.statuses {
            match registry.find_by_name_and_scope(status_name, scope).await? {
                Some(status) => {
                    debug!(
                        status = %status.name,
                        column = column_plan.name,
                        "assigning status to seeded column"
                    );
                    column.statuses.push(status.id);
                }
                None => {
                    warn!(
                        status = status_name,
                        column = column_plan.name,
                        "status not found, skipping"
                    );
                }
            }
        }

        if column.statuses.is_empty() {
            warn!(column = column_plan.name, "column resolved no statuses, dropping");
            continue;
        }

        // Dropped columns must not leave gaps, so order by survivors
        column.order = Some(line.columns.len() as i32 + 1);
        line.attach_column(column);
    }

    if line.columns.is_empty() {
        warn!(
            line = plan.name,
            "no planned column survived, falling back to a single catch-all column"
        );
        let fallback = Column::new("All Items", line.id.clone())
            .with_color(auto_color("All Items"))
            .with_order(1)
            .with_statuses(scope_statuses.iter().map(|s| s.id.clone()).collect())
            .as_default();
        line.attach_column(fallback);
    }

    // Validate each attached column against the in-memory batch before the
    // cascade save writes anything
    for column in &line.columns {
        validate_column(ctx, column, &line).await?;
    }

    Ok(line)
}
