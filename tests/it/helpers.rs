//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestGridBuilder` - Builder pattern for creating test grids
//! - `ChangeRecorder` - Captures change-handler calls in controlled mode
//! - Fixtures mirroring the demo dataset

use gridcore::{
    Align, CellValue, ColumnDef, ColumnType, DataGrid, GridSettings, Row, RowId,
};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// TestGridBuilder - Builder pattern for creating test grids
// ============================================================================

/// Builder for creating test grids.
///
/// # Example
/// ```ignore
/// let grid = TestGridBuilder::new()
///     .with_column(ColumnDef::new("age").column_type(ColumnType::Number))
///     .with_row(json!({"id": 1, "age": 31}))
///     .build();
/// ```
pub struct TestGridBuilder {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
    settings: GridSettings,
}

impl Default for TestGridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGridBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            settings: GridSettings::default(),
        }
    }

    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add a row given as a JSON object.
    pub fn with_row(mut self, row: serde_json::Value) -> Self {
        self.rows.push(row_from(row));
        self
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build an uncontrolled grid.
    pub fn build(self) -> DataGrid {
        DataGrid::with_settings(self.columns, self.rows, self.settings)
            .expect("test columns should be valid")
    }

    /// Build a controlled grid whose handler records into the returned recorder.
    pub fn build_controlled(self) -> (DataGrid, ChangeRecorder) {
        let recorder = ChangeRecorder::default();
        let sink = recorder.clone();
        let grid = self
            .build()
            .with_change_handler(move |id, field, value| sink.record(id, field, value));
        (grid, recorder)
    }
}

// ============================================================================
// ChangeRecorder
// ============================================================================

/// Collects `(row_id, field, value)` triples delivered to a change handler.
#[derive(Clone, Default)]
pub struct ChangeRecorder {
    calls: Arc<Mutex<Vec<(RowId, String, CellValue)>>>,
}

impl ChangeRecorder {
    pub fn record(&self, id: &RowId, field: &str, value: &CellValue) {
        self.calls
            .lock()
            .push((id.clone(), field.to_string(), value.clone()));
    }

    pub fn calls(&self) -> Vec<(RowId, String, CellValue)> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn row_from(value: serde_json::Value) -> Row {
    serde_json::from_value(value).expect("row fixture should be an object")
}

/// The demo page's columns.
pub fn demo_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id")
            .header_name("ID")
            .min_width(50.0)
            .column_type(ColumnType::Number)
            .align(Align::Left),
        ColumnDef::new("firstName")
            .header_name("First name")
            .column_type(ColumnType::String),
        ColumnDef::new("lastName")
            .header_name("Last name")
            .column_type(ColumnType::String)
            .align(Align::Center),
        ColumnDef::new("age")
            .header_name("Age")
            .column_type(ColumnType::Number)
            .min_width(50.0)
            .editable(true)
            .value_validator(|v| v.is_null() || v.as_f64().is_some_and(|n| n >= 0.0)),
        ColumnDef::new("fullName")
            .header_name("Full name")
            .column_type(ColumnType::String)
            .sortable(false),
        ColumnDef::new("birthDate")
            .header_name("Birth Date")
            .column_type(ColumnType::Date)
            .align(Align::Right),
    ]
}

/// The demo page's rows.
pub fn demo_rows() -> Vec<Row> {
    [
        json!({"id": 1, "lastName": "Snow", "firstName": "Jon", "age": 14, "birthDate": "1990-01-15", "fullName": "Jon Snow"}),
        json!({"id": 2, "lastName": "Lannister", "firstName": "Cersei", "age": 31, "birthDate": "1980-06-23", "fullName": "Cersei Lannister"}),
        json!({"id": 3, "lastName": "Lannister", "firstName": "Jaime", "age": 31, "birthDate": "1980-06-23", "fullName": "Jaime Lannister"}),
        json!({"id": 4, "lastName": "Stark", "firstName": "Arya", "age": 11, "birthDate": "1995-03-10", "fullName": "Arya Stark"}),
        json!({"id": 5, "lastName": "Targaryen", "firstName": "Daenerys", "age": null, "birthDate": "1992-05-12", "fullName": "Daenerys Targaryen"}),
        json!({"id": 6, "lastName": "Melisandre", "firstName": null, "age": 150, "birthDate": "1870-01-01", "fullName": "Melisandre"}),
        json!({"id": 7, "lastName": "Clifford", "firstName": "Ferrara", "age": 44, "birthDate": "1978-04-19", "fullName": "Ferrara Clifford"}),
        json!({"id": 8, "lastName": "Frances", "firstName": "Rossini", "age": 36, "birthDate": "1986-07-12", "fullName": "Frances Rossini"}),
        json!({"id": 9, "lastName": "Roxie", "firstName": "Harvey", "age": 65, "birthDate": "1957-12-25", "fullName": "Roxie Harvey"}),
    ]
    .into_iter()
    .map(row_from)
    .collect()
}

/// A grid over the demo dataset.
pub fn demo_grid() -> DataGrid {
    TestGridBuilder::new()
        .with_columns(demo_columns())
        .with_rows(demo_rows())
        .build()
}

// ============================================================================
// Assertions
// ============================================================================

/// Row ids of the grid in display order, as integers.
pub fn ordered_ids(grid: &DataGrid) -> Vec<i64> {
    grid.ordered_rows()
        .iter()
        .map(|row| row.get("id").as_f64().expect("fixture rows have numeric ids") as i64)
        .collect()
}

pub fn id(n: i64) -> RowId {
    RowId::from(n)
}
