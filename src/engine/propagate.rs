//! Change propagation and the row working copy.
//!
//! With a change handler installed the grid is *controlled*: commits go to
//! the handler and the authoritative rows come back through
//! [`RowStore::replace`]. Without one it is *uncontrolled*: commits rewrite
//! the store's own working copy.
//!
//! The working copy is an `Arc` snapshot that is swapped, never edited in
//! place, so a reader holding an older snapshot never sees a torn update.

use crate::engine::column::call_guarded;
use crate::engine::edit::CellChange;
use crate::types::{CellValue, Row, RowId};
use serde::Serialize;
use std::sync::Arc;

/// External change callback: `(row_id, field, new_value)`.
pub type ChangeHandler = Arc<dyn Fn(&RowId, &str, &CellValue) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationMode {
    Controlled,
    Uncontrolled,
}

/// Rows as last supplied from outside, plus the working copy derived from them.
pub struct RowStore {
    /// Last collection supplied from outside
    external: Arc<Vec<Row>>,
    /// What the grid shows; equals `external` until an uncontrolled commit
    working: Arc<Vec<Row>>,
    handler: Option<ChangeHandler>,
    /// Bumped whenever `working` is replaced
    generation: u64,
}

impl RowStore {
    pub fn new(rows: impl Into<Arc<Vec<Row>>>) -> Self {
        let external = rows.into();
        Self {
            working: external.clone(),
            external,
            handler: None,
            generation: 0,
        }
    }

    pub fn set_handler(&mut self, handler: Option<ChangeHandler>) {
        self.handler = handler;
    }

    pub fn mode(&self) -> PropagationMode {
        if self.handler.is_some() {
            PropagationMode::Controlled
        } else {
            PropagationMode::Uncontrolled
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.working
    }

    /// Shared handle to the current working copy.
    pub fn snapshot(&self) -> Arc<Vec<Row>> {
        self.working.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Accept a collection supplied from outside.
    ///
    /// The same collection (by reference or by content) is ignored, so local
    /// uncontrolled edits survive a re-supply of unchanged input. Anything
    /// else discards the working copy. Returns whether the rows changed.
    pub fn replace(&mut self, rows: impl Into<Arc<Vec<Row>>>) -> bool {
        let rows = rows.into();
        if Arc::ptr_eq(&rows, &self.external) || *rows == *self.external {
            return false;
        }
        tracing::debug!(count = rows.len(), "External rows replaced working copy");
        self.external = rows.clone();
        self.working = rows;
        self.generation += 1;
        true
    }

    /// Position and content of the row with identity `row_id`.
    pub fn find(&self, row_id: &RowId) -> Option<(usize, &Row)> {
        self.working
            .iter()
            .enumerate()
            .find(|(i, row)| RowId::for_row(row, *i) == *row_id)
    }

    /// Deliver a committed change. Returns whether anything was propagated.
    pub fn propagate(&mut self, change: &CellChange) -> bool {
        match &self.handler {
            Some(handler) => {
                tracing::debug!(row = %change.row_id, field = %change.field, "Propagating change to handler");
                call_guarded("onCellChange", &change.field, (), || {
                    handler(&change.row_id, &change.field, &change.value)
                });
                true
            }
            None => self.apply_locally(change),
        }
    }

    fn apply_locally(&mut self, change: &CellChange) -> bool {
        let Some((position, _)) = self.find(&change.row_id) else {
            tracing::warn!(row = %change.row_id, field = %change.field, "Dropping change for missing row");
            return false;
        };

        let mut rows = (*self.working).clone();
        rows[position].set(change.field.clone(), change.value.clone());
        self.working = Arc::new(rows);
        self.generation += 1;
        tracing::debug!(row = %change.row_id, field = %change.field, "Applied change to working copy");
        true
    }
}

impl std::fmt::Debug for RowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStore")
            .field("rows", &self.working.len())
            .field("mode", &self.mode())
            .field("generation", &self.generation)
            .finish()
    }
}
