//! JSON data loading
//!
//! Parses row collections and column declarations from JSON.

use crate::constants::JSON_WRAPPER_KEYS;
use crate::data::{GridError, GridResult};
use crate::engine::ColumnDef;
use crate::types::Row;
use serde_json::Value;
use std::path::Path;

/// Parse a JSON file of rows
pub fn rows_from_file(path: impl AsRef<Path>) -> GridResult<Vec<Row>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    rows_from_json(&content)
}

/// Parse rows from JSON text: an array of objects, bare or wrapped
/// under one of the common keys (`data`, `rows`, `items`, ...)
pub fn rows_from_json(json: &str) -> GridResult<Vec<Row>> {
    let value: Value = serde_json::from_str(json)?;
    let array = extract_array(&value)?;

    let rows = array
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(GridError::InvalidData(format!(
                    "Row {} is not an object",
                    i
                )));
            }
            Ok(serde_json::from_value::<Row>(item.clone())?)
        })
        .collect::<GridResult<Vec<_>>>()?;

    tracing::debug!(count = rows.len(), "Parsed rows from JSON");
    Ok(rows)
}

/// Parse a JSON file of column declarations
pub fn columns_from_file(path: impl AsRef<Path>) -> GridResult<Vec<ColumnDef>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    columns_from_json(&content)
}

/// Parse column declarations (data part only; hooks are attached in code)
pub fn columns_from_json(json: &str) -> GridResult<Vec<ColumnDef>> {
    Ok(serde_json::from_str(json)?)
}

/// Extract the array from JSON value, handling common wrapper patterns
fn extract_array(value: &Value) -> GridResult<&Vec<Value>> {
    match value {
        Value::Array(arr) => Ok(arr),
        Value::Object(obj) => JSON_WRAPPER_KEYS
            .iter()
            .find_map(|key| match obj.get(*key) {
                Some(Value::Array(arr)) => Some(arr),
                _ => None,
            })
            .ok_or_else(|| {
                GridError::InvalidData(
                    "JSON must be an array or have a data/rows/items/records/results array"
                        .to_string(),
                )
            }),
        _ => Err(GridError::InvalidData(
            "JSON must be an array of objects".to_string(),
        )),
    }
}
