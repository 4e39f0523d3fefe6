//! Workflows over a grid whose owner applies changes itself.

use crate::helpers::{TestGridBuilder, demo_columns, demo_rows, id};
use gridcore::{CellValue, ColumnDef, CommitOutcome, PropagationMode, logging};
use serde_json::json;

#[test]
fn test_commit_notifies_handler_once() {
    let (mut grid, recorder) = TestGridBuilder::new()
        .with_columns(demo_columns())
        .with_rows(demo_rows())
        .build_controlled();
    assert_eq!(grid.mode(), PropagationMode::Controlled);

    grid.open_edit(&id(3), "age").unwrap();
    grid.set_pending(32.into());
    assert!(matches!(grid.commit_edit(), CommitOutcome::Committed(_)));

    assert_eq!(
        recorder.calls(),
        vec![(id(3), "age".to_string(), CellValue::from(32))]
    );
    // The grid waits for its owner to hand back new rows.
    assert_eq!(grid.resolved_value(&id(3), "age").unwrap(), CellValue::from(31));
}

#[test]
fn test_owner_applies_change_through_new_rows() {
    let (mut grid, recorder) = TestGridBuilder::new()
        .with_columns(demo_columns())
        .with_rows(demo_rows())
        .build_controlled();
    grid.header_click("age");

    grid.open_edit(&id(4), "age").unwrap();
    grid.set_pending(70.into());
    grid.commit_edit();

    let mut rows = demo_rows();
    for (row_id, field, value) in recorder.calls() {
        for row in rows.iter_mut() {
            if row.get("id").to_string() == row_id.to_string() {
                row.set(field.clone(), value.clone());
            }
        }
    }
    assert!(grid.set_rows(rows));

    assert_eq!(grid.resolved_value(&id(4), "age").unwrap(), CellValue::from(70));
    let order = grid.ordered_ids();
    assert_eq!(order[6], id(4));
}

#[test]
fn test_invalid_or_cancelled_edits_are_not_propagated() {
    let (mut grid, recorder) = TestGridBuilder::new()
        .with_columns(demo_columns())
        .with_rows(demo_rows())
        .build_controlled();

    grid.open_edit(&id(1), "age").unwrap();
    grid.set_pending((-3).into());
    assert_eq!(grid.commit_edit(), CommitOutcome::Invalid);
    grid.cancel_edit();

    grid.open_edit(&id(2), "age").unwrap();
    grid.open_edit(&id(3), "age").unwrap();
    grid.cancel_edit();

    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_panicking_handler_does_not_break_grid() {
    logging::init_for_tests();
    let mut grid = TestGridBuilder::new()
        .with_column(ColumnDef::new("age").editable(true))
        .with_row(json!({"id": 1, "age": 14}))
        .build()
        .with_change_handler(|_, _, _| panic!("handler failure"));

    grid.open_edit(&id(1), "age").unwrap();
    grid.set_pending(15.into());
    assert!(matches!(grid.commit_edit(), CommitOutcome::Committed(_)));

    grid.open_edit(&id(1), "age").unwrap();
    assert_eq!(grid.displayed_value(&id(1), "age").unwrap(), CellValue::from(14));
}

#[test]
fn test_removing_handler_switches_to_uncontrolled() {
    let (mut grid, recorder) = TestGridBuilder::new()
        .with_column(ColumnDef::new("age").editable(true))
        .with_row(json!({"id": 1, "age": 14}))
        .build_controlled();

    grid.set_change_handler(None);
    assert_eq!(grid.mode(), PropagationMode::Uncontrolled);

    grid.open_edit(&id(1), "age").unwrap();
    grid.set_pending(15.into());
    grid.commit_edit();

    assert_eq!(recorder.count(), 0);
    assert_eq!(grid.resolved_value(&id(1), "age").unwrap(), CellValue::from(15));
}
