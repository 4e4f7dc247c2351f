//! Ordering Normalizer
//!
//! Recomputes a line's column orders into the contiguous sequence 1..N,
//! persisting only the columns whose stored order actually deviates.

use crate::context::KanbanContext;
use crate::error::Result;
use crate::types::{Column, LineId};
use tracing::debug;

/// Normalize the display order of a line's columns.
///
/// Reads all columns of the line sorted by current order (missing orders
/// last), and rewrites any column whose order is missing, non-positive, or
/// out of the expected 1..N sequence. Columns already in position are left
/// untouched, so calling this twice in a row performs no writes the second
/// time. Returns the sorted, normalized list.
pub async fn normalize_column_order(ctx: &KanbanContext, line: &LineId) -> Result<Vec<Column>> {
    let mut columns = ctx.find_columns_by_line(line).await?;

    let needs_update = columns
        .iter()
        .enumerate()
        .any(|(index, column)| column.order != Some(index as i32 + 1));
    if !needs_update {
        return Ok(columns);
    }

    for (index, column) in columns.iter_mut().enumerate() {
        let expected = index as i32 + 1;
        if column.order != Some(expected) {
            debug!(
                column = %column.name,
                from = ?column.order,
                to = expected,
                "normalizing column order"
            );
            column.order = Some(expected);
            *column = ctx.save_column(column.clone()).await?;
        }
    }

    Ok(columns)
}
