//! Core value types for the grid engine.
//!
//! Rows are schema-less: an ordered mapping from field name to [`CellValue`].
//! Columns decide which of those fields the engine looks at.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field every row is expected to carry as its identity.
pub const ID_FIELD: &str = "id";

static NULL: CellValue = CellValue::Null;

// ============================================================================
// Cell Values
// ============================================================================

/// A single field value inside a row.
///
/// Absent fields and `Null` are interchangeable everywhere in the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Multi-valued cells (e.g. a list of assignees)
    List(Vec<CellValue>),
    Map(BTreeMap<String, CellValue>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value. Numeric text is coerced, anything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => {
                // No trailing ".0" for whole numbers
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => f.write_str(s),
            CellValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            CellValue::Map(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One record of the dataset. Fields not declared as columns are carried along untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Value stored under `field`, `Null` when absent.
    pub fn get(&self, field: &str) -> &CellValue {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// The row's own identity value, if it has a usable one.
    pub fn id_value(&self) -> Option<&CellValue> {
        self.fields.get(ID_FIELD).filter(|v| !v.is_null())
    }
}

// ============================================================================
// Row Identity
// ============================================================================

/// Stable identity of a row across re-sorts and re-renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RowId {
    /// Display form of the row's `id` field
    Key(String),
    /// Position in the supplied collection, used when the row has no `id`
    Index(usize),
}

impl RowId {
    /// Identity of `row` sitting at `index` in its collection.
    pub fn for_row(row: &Row, index: usize) -> Self {
        match row.id_value() {
            Some(value) => RowId::Key(value.to_string()),
            None => RowId::Index(index),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Key(key) => f.write_str(key),
            RowId::Index(index) => write!(f, "#{}", index),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        RowId::Key(id.to_string())
    }
}

impl From<i32> for RowId {
    fn from(id: i32) -> Self {
        RowId::Key(id.to_string())
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId::Key(id.to_string())
    }
}
