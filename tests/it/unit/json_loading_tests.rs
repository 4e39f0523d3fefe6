//! Unit tests for loading rows and columns from JSON files.

use crate::helpers::id;
use gridcore::data::{columns_from_file, rows_from_file, rows_from_json};
use gridcore::{CellValue, ColumnType, DataGrid, GridError, RowId};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_grid_from_files() {
    let dir = tempdir().unwrap();
    let rows_path = dir.path().join("rows.json");
    let columns_path = dir.path().join("columns.json");
    fs::write(
        &rows_path,
        r#"{"rows": [
            {"id": 1, "lastName": "Snow", "age": 14},
            {"id": 2, "lastName": "Lannister", "age": 31}
        ]}"#,
    )
    .unwrap();
    fs::write(
        &columns_path,
        r#"[
            {"field": "lastName", "headerName": "Last name"},
            {"field": "age", "type": "number", "editable": true}
        ]"#,
    )
    .unwrap();

    let grid = DataGrid::new(
        columns_from_file(&columns_path).unwrap(),
        rows_from_file(&rows_path).unwrap(),
    )
    .unwrap();

    assert_eq!(grid.rows().len(), 2);
    let age = grid.columns().get("age").unwrap();
    assert_eq!(age.column_type, ColumnType::Number);
    assert!(age.editable);
    assert_eq!(grid.resolved_value(&id(2), "age").unwrap(), CellValue::from(31));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = rows_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));
}

#[test]
fn test_rows_without_id_use_position() {
    let rows = rows_from_json(r#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
    let grid = DataGrid::new(Vec::new(), rows).unwrap();
    assert_eq!(grid.ordered_ids(), vec![RowId::Index(0), RowId::Index(1)]);
}

#[test]
fn test_duplicate_column_in_file_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("columns.json");
    fs::write(&path, r#"[{"field": "a"}, {"field": "a"}]"#).unwrap();

    let err = DataGrid::new(columns_from_file(&path).unwrap(), Vec::new()).unwrap_err();
    assert!(matches!(err, GridError::DuplicateField(_)));
}
