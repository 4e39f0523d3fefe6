//! Cell value resolution.
//!
//! The displayable (and sortable) value of a cell is the column's
//! `value_getter` applied to the row when present, else the raw field.

use crate::engine::column::{Column, call_guarded};
use crate::types::{CellValue, Row, RowId};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Resolve the value of `column` for `row`. Absent fields resolve to `Null`.
pub fn resolve(row: &Row, column: &Column) -> CellValue {
    match &column.value_getter {
        Some(getter) => call_guarded("valueGetter", &column.field, CellValue::Null, || getter(row)),
        None => row.get(&column.field).clone(),
    }
}

type CacheKey = (RowId, String, u64);

/// Memo of resolved values keyed by (row identity, field, row generation).
///
/// Entries from an older generation are dropped as soon as a newer
/// generation is looked up, so a stale row can never answer for a fresh one.
#[derive(Debug, Default)]
pub struct ValueCache {
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    generation: u64,
    entries: HashMap<CacheKey, CellValue>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for the cell, resolving and storing it on a miss.
    pub fn get_or_resolve(
        &self,
        row_id: &RowId,
        generation: u64,
        row: &Row,
        column: &Column,
    ) -> CellValue {
        let key = (row_id.clone(), column.field.clone(), generation);
        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                inner.entries.clear();
                inner.generation = generation;
            }
            if let Some(value) = inner.entries.get(&key) {
                return value.clone();
            }
        }

        // Resolve outside the lock; hooks are caller code.
        let value = resolve(row, column);
        let mut inner = self.inner.lock();
        if inner.generation == generation {
            inner.entries.insert(key, value.clone());
        }
        value
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
