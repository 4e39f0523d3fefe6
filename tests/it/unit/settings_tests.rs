//! Unit tests for settings loading.

use gridcore::{ColumnDef, DataGrid, GridError, GridSettings};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let settings = GridSettings::load(dir.path().join("absent.json")).unwrap();
    assert_eq!(settings, GridSettings::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.json");
    fs::write(
        &path,
        r#"{"defaultMinWidth": 120, "dateFormat": "%Y-%m-%d", "commitOnBlur": false}"#,
    )
    .unwrap();

    let settings = GridSettings::load(&path).unwrap();

    assert_eq!(settings.default_min_width, 120.0);
    assert_eq!(settings.date_format, "%Y-%m-%d");
    assert!(!settings.commit_on_blur);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(GridSettings::load(&path), Err(GridError::Json(_))));
}

#[test]
fn test_settings_reach_columns() {
    let settings = GridSettings::from_json_str(r#"{"defaultMinWidth": 90}"#).unwrap();
    let grid = DataGrid::with_settings(vec![ColumnDef::new("name")], Vec::new(), settings).unwrap();
    assert_eq!(grid.columns().get("name").unwrap().min_width, 90.0);
}
