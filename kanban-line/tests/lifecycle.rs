//! End-to-end column lifecycle coverage: save, reorder, move, delete,
//! with the partition / single-default / contiguity invariants checked
//! across whole operation sequences.

use kanban_line::column::{DeleteColumn, MoveColumnDown, MoveColumnUp, SaveColumn};
use kanban_line::types::{Column, Line, ScopeId, Status, StatusId};
use kanban_line::{KanbanContext, KanbanError, KanbanOperationProcessor};
use std::collections::HashSet;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    ctx: KanbanContext,
    processor: KanbanOperationProcessor,
    scope: ScopeId,
}

async fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::new(temp.path().join(".kanban"));
    ctx.create_directories().await.unwrap();
    Fixture {
        _temp: temp,
        ctx,
        processor: KanbanOperationProcessor::with_actor("lifecycle-test"),
        scope: ScopeId::from_string("acme"),
    }
}

impl Fixture {
    async fn line(&self, name: &str) -> Line {
        self.ctx
            .save_line(Line::new(name, self.scope.clone()))
            .await
            .unwrap()
    }

    async fn status(&self, name: &str) -> StatusId {
        let status = Status::new(name, self.scope.clone());
        self.ctx.write_status(&status).await.unwrap();
        status.id
    }

    async fn columns(&self, line: &Line) -> Vec<Column> {
        self.ctx.find_columns_by_line(&line.id).await.unwrap()
    }

    fn assert_invariants(&self, columns: &[Column]) {
        // Contiguity: the order multiset is exactly {1..N}
        let mut orders: Vec<i32> = columns.iter().filter_map(|c| c.order).collect();
        orders.sort_unstable();
        let expected: Vec<i32> = (1..=columns.len() as i32).collect();
        assert_eq!(orders, expected, "orders must be contiguous 1..N");

        // Partition: no status appears in two columns
        let mut seen = HashSet::new();
        for column in columns {
            for status in &column.statuses {
                assert!(
                    seen.insert(status.clone()),
                    "status {status} owned by more than one column"
                );
            }
        }

        // At most one default
        assert!(
            columns.iter().filter(|c| c.is_default).count() <= 1,
            "more than one default column"
        );
    }
}

#[tokio::test]
async fn save_new_column_appends_without_touching_siblings() {
    let f = fixture().await;
    let line = f.line("Board").await;
    let todo = f.status("Not Started").await;
    let done = f.status("Completed").await;
    let doing = f.status("In Progress").await;

    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("To Do", line.id.clone()).with_status(todo.clone())),
        )
        .await
        .unwrap();
    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(
                Column::new("Done", line.id.clone())
                    .with_status(done.clone())
                    .as_default(),
            ),
        )
        .await
        .unwrap();

    // A status no sibling holds: save succeeds and lands at the end
    let saved = f
        .processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("In Progress", line.id.clone()).with_status(doing)),
        )
        .await
        .unwrap();
    assert_eq!(saved["order"], 3);

    let columns = f.columns(&line).await;
    assert_eq!(columns.len(), 3);
    f.assert_invariants(&columns);

    let done_col = columns.iter().find(|c| c.name == "Done").unwrap();
    assert!(done_col.is_default, "sibling default untouched");
    assert_eq!(done_col.statuses, vec![done]);
    let todo_col = columns.iter().find(|c| c.name == "To Do").unwrap();
    assert_eq!(todo_col.statuses, vec![todo]);
}

#[tokio::test]
async fn save_rejects_status_already_owned_naming_the_offenders() {
    let f = fixture().await;
    let line = f.line("Board").await;
    let review = f.status("In Review").await;

    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("ColumnA", line.id.clone()).with_status(review.clone())),
        )
        .await
        .unwrap();

    let err = f
        .processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("ColumnB", line.id.clone()).with_status(review)),
        )
        .await
        .unwrap_err();

    match err {
        KanbanError::Validation { message } => {
            assert!(message.contains("In Review"), "message names the status: {message}");
            assert!(message.contains("ColumnA"), "message names the holder: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Nothing was written for the rejected column
    let columns = f.columns(&line).await;
    assert_eq!(columns.len(), 1);
}

#[tokio::test]
async fn save_new_default_strips_previous_default() {
    let f = fixture().await;
    let line = f.line("Board").await;

    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("ColumnA", line.id.clone()).as_default()),
        )
        .await
        .unwrap();

    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("ColumnB", line.id.clone()).as_default()),
        )
        .await
        .unwrap();

    let columns = f.columns(&line).await;
    f.assert_invariants(&columns);
    let a = columns.iter().find(|c| c.name == "ColumnA").unwrap();
    let b = columns.iter().find(|c| c.name == "ColumnB").unwrap();
    assert!(!a.is_default, "old default must be stripped");
    assert!(b.is_default, "new column keeps its default flag");
}

#[tokio::test]
async fn move_up_swaps_with_the_previous_neighbor() {
    let f = fixture().await;
    let line = f.line("Board").await;

    for name in ["First", "Second", "Third"] {
        f.processor
            .process(&f.ctx, &SaveColumn::new(Column::new(name, line.id.clone())))
            .await
            .unwrap();
    }

    let third = f
        .columns(&line)
        .await
        .into_iter()
        .find(|c| c.name == "Third")
        .unwrap();
    f.processor
        .process(&f.ctx, &MoveColumnUp::new(third.id.clone().unwrap()))
        .await
        .unwrap();

    let columns = f.columns(&line).await;
    f.assert_invariants(&columns);
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Third", "Second"]);
}

#[tokio::test]
async fn move_at_the_boundary_is_a_no_op() {
    let f = fixture().await;
    let line = f.line("Board").await;

    for name in ["First", "Second"] {
        f.processor
            .process(&f.ctx, &SaveColumn::new(Column::new(name, line.id.clone())))
            .await
            .unwrap();
    }
    let columns = f.columns(&line).await;
    let first = columns.iter().find(|c| c.name == "First").unwrap();
    let second = columns.iter().find(|c| c.name == "Second").unwrap();

    f.processor
        .process(&f.ctx, &MoveColumnUp::new(first.id.clone().unwrap()))
        .await
        .unwrap();
    f.processor
        .process(&f.ctx, &MoveColumnDown::new(second.id.clone().unwrap()))
        .await
        .unwrap();

    let after = f.columns(&line).await;
    let names: Vec<&str> = after.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn delete_middle_column_closes_the_gap() {
    let f = fixture().await;
    let line = f.line("Board").await;

    for name in ["First", "Second", "Third"] {
        f.processor
            .process(&f.ctx, &SaveColumn::new(Column::new(name, line.id.clone())))
            .await
            .unwrap();
    }

    let second = f
        .columns(&line)
        .await
        .into_iter()
        .find(|c| c.name == "Second")
        .unwrap();
    f.processor
        .process(&f.ctx, &DeleteColumn::new(second.id.clone().unwrap()))
        .await
        .unwrap();

    let columns = f.columns(&line).await;
    assert_eq!(columns.len(), 2);
    f.assert_invariants(&columns);
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Third"]);
}

#[tokio::test]
async fn reserved_name_is_rejected_in_any_case() {
    let f = fixture().await;
    let line = f.line("Board").await;

    for name in ["Backlog", "backlog", "BACKLOG", "  Backlog  "] {
        let err = f
            .processor
            .process(&f.ctx, &SaveColumn::new(Column::new(name, line.id.clone())))
            .await
            .unwrap_err();
        assert!(
            matches!(err, KanbanError::Validation { .. }),
            "{name:?} must be rejected"
        );
    }
    assert!(f.columns(&line).await.is_empty());
}

#[tokio::test]
async fn normalization_repairs_gapped_orders_and_is_idempotent() {
    let f = fixture().await;
    let line = f.line("Board").await;

    // Write gapped orders directly, bypassing the commands
    for (name, order) in [("A", 2), ("B", 7), ("C", 40)] {
        f.ctx
            .save_column(Column::new(name, line.id.clone()).with_order(order))
            .await
            .unwrap();
    }

    let normalized = kanban_line::ordering::normalize_column_order(&f.ctx, &line.id)
        .await
        .unwrap();
    let orders: Vec<i32> = normalized.iter().filter_map(|c| c.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);

    // Second pass changes nothing
    let again = kanban_line::ordering::normalize_column_order(&f.ctx, &line.id)
        .await
        .unwrap();
    assert_eq!(
        again.iter().filter_map(|c| c.order).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn invariants_hold_across_a_mixed_operation_sequence() {
    let f = fixture().await;
    let line = f.line("Board").await;
    let s1 = f.status("Not Started").await;
    let s2 = f.status("In Progress").await;
    let s3 = f.status("Completed").await;

    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("To Do", line.id.clone()).with_status(s1)),
        )
        .await
        .unwrap();
    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("Doing", line.id.clone()).with_status(s2)),
        )
        .await
        .unwrap();
    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(
                Column::new("Done", line.id.clone()).with_status(s3).as_default(),
            ),
        )
        .await
        .unwrap();

    let doing = f
        .columns(&line)
        .await
        .into_iter()
        .find(|c| c.name == "Doing")
        .unwrap();
    f.processor
        .process(&f.ctx, &MoveColumnUp::new(doing.id.clone().unwrap()))
        .await
        .unwrap();
    f.processor
        .process(&f.ctx, &DeleteColumn::new(doing.id.unwrap()))
        .await
        .unwrap();
    f.processor
        .process(
            &f.ctx,
            &SaveColumn::new(Column::new("Archive", line.id.clone()).as_default()),
        )
        .await
        .unwrap();

    let columns = f.columns(&line).await;
    assert_eq!(columns.len(), 3);
    f.assert_invariants(&columns);
    assert!(columns.iter().find(|c| c.name == "Archive").unwrap().is_default);
    assert!(!columns.iter().find(|c| c.name == "Done").unwrap().is_default);
}

#[tokio::test]
async fn activity_log_records_mutations_newest_first() {
    let f = fixture().await;
    let line = f.line("Board").await;

    f.processor
        .process(&f.ctx, &SaveColumn::new(Column::new("To Do", line.id.clone())))
        .await
        .unwrap();
    f.processor
        .process(&f.ctx, &SaveColumn::new(Column::new("Done", line.id.clone())))
        .await
        .unwrap();

    let activity = f.ctx.read_activity(None).await.unwrap();
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].op, "save column");
    assert_eq!(activity[0].actor.as_deref(), Some("lifecycle-test"));
    assert_eq!(activity[0].output["name"], "Done");
    assert_eq!(activity[1].output["name"], "To Do");
}

// The fail-fast gate also sees columns only attached in memory
#[tokio::test]
async fn unsaved_drafts_in_one_batch_cannot_share_a_status() {
    let f = fixture().await;
    let review = f.status("In Review").await;

    let mut line = Line::new("Board", f.scope.clone());
    line.attach_column(Column::new("ColumnA", line.id.clone()).with_status(review.clone()));
    let draft_b = Column::new("ColumnB", line.id.clone()).with_status(review);

    let err = kanban_line::validate::validate_column(&f.ctx, &draft_b, &line)
        .await
        .unwrap_err();
    assert!(matches!(err, KanbanError::Validation { .. }));
}
