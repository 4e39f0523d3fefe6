//! Render dispatch.
//!
//! Maps a resolved value to a presentation-ready cell. Built-in renderers only
//! format; they never sort or validate. Rendering is a pure function of the
//! value, the row and the settings.

use crate::engine::column::{Align, Column, ColumnType, call_guarded};
use crate::engine::dates::parse_date;
use crate::settings::GridSettings;
use crate::types::{CellValue, Row};
use serde::Serialize;
use std::fmt::Write;

/// Which presentation produced a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    String,
    Number,
    Date,
    Default,
    /// Produced by a column's own renderer
    Custom,
}

/// A rendered cell handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedCell {
    pub kind: CellKind,
    pub text: String,
    pub align: Align,
}

impl RenderedCell {
    /// Convenience constructor for column renderers.
    pub fn custom(text: impl Into<String>, align: Align) -> Self {
        Self {
            kind: CellKind::Custom,
            text: text.into(),
            align,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Render `value` for `column`. A column renderer wins; a panicking one
/// falls back to the built-in presentation.
pub fn dispatch(column: &Column, value: &CellValue, row: &Row, settings: &GridSettings) -> RenderedCell {
    match &column.render_cell {
        Some(renderer) => call_guarded("renderCell", &column.field, builtin(column, value, settings), || {
            renderer(value, row)
        }),
        None => builtin(column, value, settings),
    }
}

fn builtin(column: &Column, value: &CellValue, settings: &GridSettings) -> RenderedCell {
    let (kind, text) = match column.column_type {
        ColumnType::String => (CellKind::String, value.to_string()),
        ColumnType::Number => (CellKind::Number, value.to_string()),
        ColumnType::Date => (CellKind::Date, format_date(value, &settings.date_format)),
        ColumnType::Other => (CellKind::Default, value.to_string()),
    };
    RenderedCell {
        kind,
        text,
        align: column.align,
    }
}

/// Date text for display; empty for null or unparseable values.
pub fn format_date(value: &CellValue, format: &str) -> String {
    let Some(date) = parse_date(value) else {
        return String::new();
    };
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        tracing::warn!(format, "Invalid date format, using default");
        out.clear();
        let _ = write!(out, "{}", date.format(crate::constants::DEFAULT_DATE_FORMAT));
    }
    out
}
