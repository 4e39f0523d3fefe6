//! Snapshot tests using the insta crate.
//!
//! These pin the serialized shape of the state the engine hands to a
//! presentation layer. To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::{TestGridBuilder, demo_grid};
use gridcore::{CellValue, ColumnDef, DataGrid, RowId, SortSpec};
use serde_json::json;

fn house_grid() -> DataGrid {
    TestGridBuilder::new()
        .with_column(
            ColumnDef::new("house")
                .editable(true)
                .value_validator(|v| v.as_str().is_some_and(|s| !s.trim().is_empty())),
        )
        .with_row(json!({"id": "jon", "house": "Stark"}))
        .with_row(json!({"id": "cersei", "house": "Lannister"}))
        .build()
}

#[test]
fn snapshot_edit_state_while_editing() {
    let mut grid = house_grid();
    grid.open_edit(&RowId::from("jon"), "house").unwrap();
    grid.set_pending(CellValue::from("Targaryen"));

    insta::assert_json_snapshot!(grid.edit_state(), @r###"
    {
      "rowId": "jon",
      "field": "house",
      "originalValue": "Stark",
      "pendingValue": "Targaryen",
      "phase": "editing",
      "invalid": false
    }
    "###);
}

#[test]
fn snapshot_invalid_edit_state() {
    let mut grid = house_grid();
    grid.open_edit(&RowId::from("cersei"), "house").unwrap();
    grid.set_pending(CellValue::from("  "));
    grid.commit_edit();

    insta::assert_json_snapshot!(grid.edit_state(), @r###"
    {
      "rowId": "cersei",
      "field": "house",
      "originalValue": "Lannister",
      "pendingValue": "  ",
      "phase": "editing",
      "invalid": true
    }
    "###);
}

#[test]
fn snapshot_sort_state() {
    let mut grid = demo_grid();
    grid.header_click("lastName");
    grid.header_click("lastName");

    insta::assert_json_snapshot!(grid.sort_state(), @r###"
    {
      "spec": {
        "field": "lastName",
        "direction": "descending"
      }
    }
    "###);
}

#[test]
fn snapshot_cleared_sort_state() {
    let mut grid = demo_grid();
    grid.set_sort(Some(SortSpec::ascending("age")));
    grid.set_sort(None);

    insta::assert_json_snapshot!(grid.sort_state(), @r###"
    {
      "spec": null
    }
    "###);
}

#[test]
fn snapshot_rendered_date_cell() {
    let grid = demo_grid();
    insta::assert_json_snapshot!(grid.render_cell(&RowId::from(4), "birthDate").unwrap(), @r###"
    {
      "kind": "date",
      "text": "3/10/1995",
      "align": "right"
    }
    "###);
}
