//! Column validation: field checks and the status uniqueness gate
//!
//! Everything here is fail-fast and runs before any write. Status overlap is
//! a data error: a status mapped to two columns makes board display and
//! drag-drop ambiguous, so the validator rejects it with a message naming
//! every offending status and the column that already holds it.

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::registry::StatusRegistry;
use crate::types::{Column, Line, StatusId};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Maximum column name length
pub const MAX_NAME_LEN: usize = 100;
/// Maximum color code length (`#rrggbb`)
pub const MAX_COLOR_LEN: usize = 7;
/// Reserved column name, compared case-insensitively
pub const RESERVED_COLUMN_NAME: &str = "backlog";

/// Validate a column against its line before persisting it.
///
/// Checks required fields, name bounds, color format, the reserved name,
/// case-insensitive name uniqueness within the line (excluding the column
/// itself on update), numeric bounds, and finally status uniqueness.
pub async fn validate_column(ctx: &KanbanContext, column: &Column, line: &Line) -> Result<()> {
    let name = column.name.trim();
    if name.is_empty() {
        return Err(KanbanError::validation("column name is required"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(KanbanError::validation(format!(
            "column name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }
    if let Some(color) = &column.color {
        validate_color(color)?;
    }
    if name.eq_ignore_ascii_case(RESERVED_COLUMN_NAME) {
        return Err(KanbanError::validation(
            "column name 'Backlog' is reserved and cannot be used - choose a different name",
        ));
    }

    if let Some(existing) = ctx.find_column_by_line_and_name_ci(&line.id, name).await? {
        let is_self = column.id.is_some() && column.id == existing.id;
        if !is_self {
            return Err(KanbanError::validation(
                "column name must be unique within the kanban line",
            ));
        }
    }

    // Same check against the in-memory attached collection. Drafts have no
    // identity yet, so the candidate excludes itself by address; a distinct
    // draft with the same name is a real duplicate. Rejecting it here also
    // keeps the name fallback in `is_same_column` sound.
    let clashing_draft = line.columns.iter().any(|sibling| {
        sibling.id.is_none()
            && !std::ptr::eq(sibling, column)
            && sibling.name.trim().eq_ignore_ascii_case(name)
    });
    if clashing_draft {
        return Err(KanbanError::validation(
            "column name must be unique within the kanban line",
        ));
    }

    if let Some(order) = column.order {
        if order < 0 {
            return Err(KanbanError::validation("display order cannot be negative"));
        }
    }
    if let Some(wip_limit) = column.wip_limit {
        if wip_limit < 0 {
            return Err(KanbanError::validation("WIP limit cannot be negative"));
        }
    }

    validate_status_uniqueness(ctx, column, line).await
}

/// Validate that no status of `column` is already mapped to another column of
/// the same line.
///
/// The sibling universe is the union of the line's *persisted* columns and
/// the line's *in-memory attached* collection - the latter catches overlaps
/// during batch initialization, when several columns are constructed
/// together before any is saved. An empty candidate status set is always
/// valid.
pub async fn validate_status_uniqueness(
    ctx: &KanbanContext,
    column: &Column,
    line: &Line,
) -> Result<()> {
    if column.statuses.is_empty() {
        debug!(column = %column.name, "column has no statuses, skipping overlap validation");
        return Ok(());
    }

    let persisted = ctx.find_columns_by_line(&line.id).await?;
    let persisted_count = persisted.len();
    let siblings: Vec<Column> = persisted
        .into_iter()
        .chain(line.columns.iter().cloned())
        .collect();
    debug!(
        column = %column.name,
        total = siblings.len(),
        persisted = persisted_count,
        in_memory = line.columns.len(),
        "checking sibling columns for status overlap"
    );

    // Map of status ID -> name of the column already holding it
    let mut status_to_column: HashMap<StatusId, String> = HashMap::new();
    for sibling in &siblings {
        if is_same_column(column, sibling) {
            continue;
        }
        for status_id in &sibling.statuses {
            status_to_column.insert(status_id.clone(), sibling.name.clone());
        }
    }

    let registry = StatusRegistry::new(ctx);
    let mut overlapping = Vec::new();
    for status_id in &column.statuses {
        if let Some(holder) = status_to_column.get(status_id) {
            let status_name = registry.display_name(status_id).await;
            warn!(
                status = %status_name,
                holder = %holder,
                candidate = %column.name,
                "status overlap detected"
            );
            overlapping.push(format!("'{}' (already in column '{}')", status_name, holder));
        }
    }

    if !overlapping.is_empty() {
        let message = format!(
            "status overlap detected in kanban line '{}': the following statuses are already mapped to other columns: {}. Each status must be mapped to exactly one column to avoid ambiguity in kanban board display",
            line.name,
            overlapping.join(", ")
        );
        error!(line = %line.name, "{}", message);
        return Err(KanbanError::validation(message));
    }

    debug!(
        column = %column.name,
        statuses = column.statuses.len(),
        "status uniqueness validated"
    );
    Ok(())
}

/// Whether `sibling` is the candidate itself.
///
/// Persisted columns compare by identity. Two unsaved drafts compare by
/// case-insensitive name, which is only sound because `validate_column`
/// rejects same-named drafts within a batch before this runs; within a
/// valid batch, name equality between drafts implies the same draft.
fn is_same_column(candidate: &Column, sibling: &Column) -> bool {
    match (&candidate.id, &sibling.id) {
        (Some(a), Some(b)) => a == b,
        (None, None) => candidate.name.trim().eq_ignore_ascii_case(sibling.name.trim()),
        _ => false,
    }
}

fn validate_color(color: &str) -> Result<()> {
    if color.len() > MAX_COLOR_LEN {
        return Err(KanbanError::validation(format!(
            "color code cannot exceed {} characters",
            MAX_COLOR_LEN
        )));
    }
    let valid = color
        .strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);
    if !valid {
        return Err(KanbanError::validation(format!(
            "color must be a #rrggbb hex code, got '{}'",
            color
        )));
    }
    Ok(())
}
