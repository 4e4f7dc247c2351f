//! Default-Column / Status-Exclusivity Enforcer
//!
//! Runs after a column has been persisted and corrects its siblings: at most
//! one default column per line, and no status mapped to more than one
//! column. Corrective, not preventive - the validator is the gate for the
//! saved column's own conflicts; this pass cleans up stale overlap left on
//! siblings (e.g. configuration imported outside normal validation).

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::types::Column;
use tracing::{debug, info, warn};

/// Enforce the single-default and status-exclusivity rules across the
/// siblings of a just-saved column.
///
/// Walks every other column of the line; a sibling may be rewritten because
/// it lost the default flag, because overlapping statuses were stripped, or
/// both. A sibling that fails to persist is logged and skipped - the primary
/// save has already committed and is never rolled back from here.
pub async fn apply_status_and_default_constraints(
    ctx: &KanbanContext,
    saved: &Column,
) -> Result<()> {
    let saved_id = saved.id.as_ref().ok_or_else(|| {
        KanbanError::validation("column must be saved before enforcing constraints")
    })?;
    let line = ctx.read_line(&saved.line).await?;
    let columns = ctx.find_columns_by_line(&line.id).await?;

    let included = saved.status_id_set();
    let is_default = saved.is_default;
    let mut removal_count = 0usize;

    for mut column in columns {
        if column.id.as_ref() == Some(saved_id) {
            continue;
        }
        let mut changed = false;

        if is_default && column.is_default {
            debug!(
                sibling = %column.name,
                saved = %saved.name,
                "removing default flag, another column is now the default"
            );
            column.is_default = false;
            changed = true;
        }

        if !included.is_empty() && !column.statuses.is_empty() {
            let before = column.statuses.len();
            column.statuses.retain(|id| !included.contains(id));
            let removed = before - column.statuses.len();
            if removed > 0 {
                debug!(
                    sibling = %column.name,
                    removed,
                    "removing overlapping statuses to maintain status uniqueness"
                );
                removal_count += removed;
                changed = true;
            }
        }

        if changed {
            if let Err(err) = ctx.save_column(column.clone()).await {
                warn!(
                    sibling = %column.name,
                    error = %err,
                    "failed to persist sibling during constraint cleanup, continuing"
                );
            }
        }
    }

    if removal_count > 0 {
        info!(
            line = %line.name,
            removed = removal_count,
            "enforced status uniqueness, removed overlapping status mappings from sibling columns"
        );
    }
    Ok(())
}
