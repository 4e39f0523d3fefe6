//! Column declarations and their normalized form.
//!
//! A column is a record of data (`field`, `type`, layout hints, flags) plus
//! optional strategy hooks. Hooks are plain shared closures; a column without
//! a hook uses the engine's built-in behavior for that concern.

use crate::data::{GridError, GridResult};
use crate::engine::render::RenderedCell;
use crate::settings::GridSettings;
use crate::types::{CellValue, Row};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Computes a derived value from the whole row.
pub type ValueGetter = Arc<dyn Fn(&Row) -> CellValue + Send + Sync>;
/// Accepts or rejects a pending edit value.
pub type ValueValidator = Arc<dyn Fn(&CellValue) -> bool + Send + Sync>;
/// Orders two rows: `(row_a, row_b, field, ascending)`.
pub type SortComparator = Arc<dyn Fn(&Row, &Row, &str, bool) -> Ordering + Send + Sync>;
/// Renders a resolved value with the full row available for context.
pub type CellRenderer = Arc<dyn Fn(&CellValue, &Row) -> RenderedCell + Send + Sync>;

// ============================================================================
// Column Type & Alignment
// ============================================================================

/// Content type of a column; drives default sorting, rendering and alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Date,
    /// Anything else; behaves like `String`
    #[default]
    #[serde(other)]
    Other,
}

impl ColumnType {
    /// Alignment used when a column declares none.
    pub fn default_align(self) -> Align {
        match self {
            ColumnType::Number => Align::Center,
            _ => Align::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// ============================================================================
// Raw Declaration
// ============================================================================

/// A column as declared by the caller. Only `field` is required.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    #[serde(default)]
    pub header_name: Option<String>,
    #[serde(default, rename = "type")]
    pub column_type: Option<ColumnType>,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub min_width: Option<f32>,
    #[serde(default)]
    pub sortable: Option<bool>,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(skip)]
    pub value_getter: Option<ValueGetter>,
    #[serde(skip)]
    pub value_validator: Option<ValueValidator>,
    #[serde(skip)]
    pub sort_comparator: Option<SortComparator>,
    #[serde(skip)]
    pub render_cell: Option<CellRenderer>,
}

impl ColumnDef {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = Some(name.into());
        self
    }

    pub fn column_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    pub fn value_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&Row) -> CellValue + Send + Sync + 'static,
    {
        self.value_getter = Some(Arc::new(getter));
        self
    }

    pub fn value_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&CellValue) -> bool + Send + Sync + 'static,
    {
        self.value_validator = Some(Arc::new(validator));
        self
    }

    pub fn sort_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Row, &Row, &str, bool) -> Ordering + Send + Sync + 'static,
    {
        self.sort_comparator = Some(Arc::new(comparator));
        self
    }

    pub fn render_cell<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&CellValue, &Row) -> RenderedCell + Send + Sync + 'static,
    {
        self.render_cell = Some(Arc::new(renderer));
        self
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("column_type", &self.column_type)
            .field("sortable", &self.sortable)
            .field("editable", &self.editable)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Normalized Column
// ============================================================================

/// A column with every optional setting resolved to its default.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub field: String,
    pub header_name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub align: Align,
    pub width: Option<f32>,
    pub min_width: f32,
    pub sortable: bool,
    pub editable: bool,
    #[serde(skip)]
    pub(crate) value_getter: Option<ValueGetter>,
    #[serde(skip)]
    pub(crate) value_validator: Option<ValueValidator>,
    #[serde(skip)]
    pub(crate) sort_comparator: Option<SortComparator>,
    #[serde(skip)]
    pub(crate) render_cell: Option<CellRenderer>,
}

impl Column {
    fn normalize(def: ColumnDef, settings: &GridSettings) -> Self {
        let column_type = def.column_type.unwrap_or_default();
        Self {
            header_name: def.header_name.unwrap_or_else(|| def.field.clone()),
            align: def.align.unwrap_or_else(|| column_type.default_align()),
            min_width: def.min_width.unwrap_or(settings.default_min_width),
            width: def.width,
            sortable: def.sortable.unwrap_or(true),
            editable: def.editable.unwrap_or(false),
            column_type,
            field: def.field,
            value_getter: def.value_getter,
            value_validator: def.value_validator,
            sort_comparator: def.sort_comparator,
            render_cell: def.render_cell,
        }
    }

    /// Run the validator against a candidate value. No validator means valid;
    /// a panicking validator means invalid.
    pub fn validate(&self, candidate: &CellValue) -> bool {
        match &self.value_validator {
            Some(validator) => call_guarded("valueValidator", &self.field, false, || {
                validator(candidate)
            }),
            None => true,
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("column_type", &self.column_type)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("editable", &self.editable)
            .field("value_getter", &self.value_getter.is_some())
            .field("sort_comparator", &self.sort_comparator.is_some())
            .finish_non_exhaustive()
    }
}

/// Run a caller-supplied hook, substituting `fallback` if it panics.
pub(crate) fn call_guarded<T>(hook: &'static str, field: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(hook, field, "Column hook panicked, using safe default");
            fallback
        }
    }
}

// ============================================================================
// Column Set
// ============================================================================

/// The validated schema: ordered columns with unique, non-empty fields.
#[derive(Clone, Debug, Default)]
pub struct ColumnSet {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    /// Normalize and validate declarations with default settings.
    pub fn new(defs: Vec<ColumnDef>) -> GridResult<Self> {
        Self::with_settings(defs, &GridSettings::default())
    }

    /// Normalize and validate declarations. Fails on an empty or repeated `field`.
    pub fn with_settings(defs: Vec<ColumnDef>, settings: &GridSettings) -> GridResult<Self> {
        let mut columns = Vec::with_capacity(defs.len());
        let mut index = HashMap::with_capacity(defs.len());

        for (position, def) in defs.into_iter().enumerate() {
            if def.field.is_empty() {
                tracing::warn!(position, "Rejecting column set: empty field");
                return Err(GridError::EmptyField { index: position });
            }
            if index.contains_key(&def.field) {
                tracing::warn!(field = %def.field, "Rejecting column set: duplicate field");
                return Err(GridError::DuplicateField(def.field));
            }
            index.insert(def.field.clone(), position);
            columns.push(Column::normalize(def, settings));
        }

        tracing::debug!(count = columns.len(), "Column set normalized");
        Ok(Self { columns, index })
    }

    pub fn get(&self, field: &str) -> Option<&Column> {
        self.index.get(field).map(|&i| &self.columns[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
