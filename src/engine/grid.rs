//! The grid engine facade.
//!
//! `DataGrid` owns the validated columns, the row store, the single sort and
//! the single edit slot, and exposes what the presentation layer needs: the
//! ordered rows, resolved and rendered cells, the sort indicator per column
//! and the edit phase.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut grid = DataGrid::new(columns, rows)?;
//! grid.header_click("age");
//! for row in grid.ordered_rows() { /* ... */ }
//!
//! grid.open_edit(&RowId::from(3), "age")?;
//! grid.set_pending(15.into());
//! grid.commit_edit();
//! ```

use crate::data::{GridError, GridResult};
use crate::engine::column::{Column, ColumnDef, ColumnSet};
use crate::engine::edit::{CommitOutcome, EditPhase, EditSession, EditState};
use crate::engine::propagate::{ChangeHandler, PropagationMode, RowStore};
use crate::engine::render::{RenderedCell, dispatch};
use crate::engine::resolve::ValueCache;
use crate::engine::sort::{SortDirection, SortSpec, SortState, sorted_order};
use crate::perf::{OperationStats, measure_and_log};
use crate::settings::GridSettings;
use crate::types::{CellValue, Row, RowId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Memoized display order and the inputs it was computed from.
struct OrderCache {
    row_generation: u64,
    column_generation: u64,
    spec: Option<SortSpec>,
    order: Arc<Vec<usize>>,
}

pub struct DataGrid {
    columns: ColumnSet,
    /// Bumped whenever the column set is replaced
    column_generation: u64,
    store: RowStore,
    sort: SortState,
    edit: EditSession,
    settings: GridSettings,
    order_cache: Mutex<Option<OrderCache>>,
    values: ValueCache,
    sort_stats: Mutex<OperationStats>,
}

impl DataGrid {
    /// Create an uncontrolled grid with default settings.
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Row>) -> GridResult<Self> {
        Self::with_settings(columns, rows, GridSettings::default())
    }

    pub fn with_settings(
        columns: Vec<ColumnDef>,
        rows: Vec<Row>,
        settings: GridSettings,
    ) -> GridResult<Self> {
        let columns = ColumnSet::with_settings(columns, &settings)?;
        Ok(Self {
            columns,
            column_generation: 0,
            store: RowStore::new(rows),
            sort: SortState::new(),
            edit: EditSession::new(),
            settings,
            order_cache: Mutex::new(None),
            values: ValueCache::new(),
            sort_stats: Mutex::new(OperationStats::default()),
        })
    }

    /// Switch to controlled mode: commits go to `handler` instead of the rows.
    pub fn with_change_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RowId, &str, &CellValue) + Send + Sync + 'static,
    {
        self.store.set_handler(Some(Arc::new(handler)));
        self
    }

    /// Install or remove the change handler, which also selects the mode.
    pub fn set_change_handler(&mut self, handler: Option<ChangeHandler>) {
        self.store.set_handler(handler);
    }

    pub fn mode(&self) -> PropagationMode {
        self.store.mode()
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Replace the schema. On a validation error the previous columns stay.
    pub fn set_columns(&mut self, defs: Vec<ColumnDef>) -> GridResult<()> {
        self.columns = ColumnSet::with_settings(defs, &self.settings)?;
        self.column_generation += 1;
        self.values.clear();

        if let Some(spec) = self.sort.spec() {
            if !self.columns.get(&spec.field).is_some_and(|c| c.sortable) {
                tracing::debug!(field = %spec.field, "Active sort column gone, clearing sort");
                self.sort.clear();
            }
        }
        if let Some(state) = self.edit.state() {
            if !self.columns.get(&state.field).is_some_and(|c| c.editable) {
                self.edit.cancel();
            }
        }
        Ok(())
    }

    /// Current working copy of the rows, in input order.
    pub fn rows(&self) -> &[Row] {
        self.store.rows()
    }

    pub fn snapshot(&self) -> Arc<Vec<Row>> {
        self.store.snapshot()
    }

    /// Supply a (possibly new) external row collection.
    ///
    /// A live edit whose row disappeared is cancelled.
    pub fn set_rows(&mut self, rows: impl Into<Arc<Vec<Row>>>) -> bool {
        if !self.store.replace(rows) {
            return false;
        }
        let orphaned = self
            .edit
            .state()
            .is_some_and(|s| self.store.find(&s.row_id).is_none());
        if orphaned {
            self.edit.cancel();
        }
        true
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Handle a click on `field`'s header. Returns the column's new direction.
    pub fn header_click(&mut self, field: &str) -> SortDirection {
        self.sort.toggle(field, &self.columns)
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn set_sort(&mut self, spec: Option<SortSpec>) {
        self.sort.set(spec);
    }

    /// Indicator direction for `field`'s header.
    pub fn sort_direction(&self, field: &str) -> SortDirection {
        self.sort.direction_for(field)
    }

    /// Row positions in display order.
    pub fn display_order(&self) -> Arc<Vec<usize>> {
        let mut cache = self.order_cache.lock();
        if let Some(entry) = cache.as_ref() {
            if entry.row_generation == self.store.generation()
                && entry.column_generation == self.column_generation
                && entry.spec.as_ref() == self.sort.spec()
            {
                return entry.order.clone();
            }
        }

        let (order, elapsed_ms) = measure_and_log(
            "sort_rows",
            self.settings.slow_sort_threshold_ms,
            || sorted_order(self.store.rows(), self.sort.spec(), &self.columns),
        );
        self.sort_stats.lock().record(elapsed_ms);
        tracing::trace!(rows = order.len(), elapsed_ms, "Display order recomputed");

        let order = Arc::new(order);
        *cache = Some(OrderCache {
            row_generation: self.store.generation(),
            column_generation: self.column_generation,
            spec: self.sort.spec().cloned(),
            order: order.clone(),
        });
        order
    }

    /// Rows in display order.
    pub fn ordered_rows(&self) -> Vec<&Row> {
        let rows = self.store.rows();
        self.display_order().iter().map(|&i| &rows[i]).collect()
    }

    /// Row identities in display order.
    pub fn ordered_ids(&self) -> Vec<RowId> {
        let rows = self.store.rows();
        self.display_order()
            .iter()
            .map(|&i| RowId::for_row(&rows[i], i))
            .collect()
    }

    /// Timing statistics of sort recomputations.
    pub fn sort_stats(&self) -> OperationStats {
        self.sort_stats.lock().clone()
    }

    // ========================================================================
    // Cells
    // ========================================================================

    fn locate(&self, row_id: &RowId, field: &str) -> GridResult<(&Row, &Column)> {
        let column = self
            .columns
            .get(field)
            .ok_or_else(|| GridError::UnknownColumn(field.to_string()))?;
        let (_, row) = self
            .store
            .find(row_id)
            .ok_or_else(|| GridError::UnknownRow(row_id.to_string()))?;
        Ok((row, column))
    }

    /// Resolved value of a cell as stored (ignores any pending edit).
    pub fn resolved_value(&self, row_id: &RowId, field: &str) -> GridResult<CellValue> {
        let (row, column) = self.locate(row_id, field)?;
        Ok(self
            .values
            .get_or_resolve(row_id, self.store.generation(), row, column))
    }

    /// Value to show in a cell: the pending value while it is under edit.
    pub fn displayed_value(&self, row_id: &RowId, field: &str) -> GridResult<CellValue> {
        match self.edit.state() {
            Some(state) if &state.row_id == row_id && state.field == field => {
                Ok(state.pending_value.clone())
            }
            _ => self.resolved_value(row_id, field),
        }
    }

    pub fn render_cell(&self, row_id: &RowId, field: &str) -> GridResult<RenderedCell> {
        let value = self.resolved_value(row_id, field)?;
        let (row, column) = self.locate(row_id, field)?;
        Ok(dispatch(column, &value, row, &self.settings))
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Open a cell for editing. A different live edit is cancelled first.
    pub fn open_edit(&mut self, row_id: &RowId, field: &str) -> GridResult<()> {
        let current = self.resolved_value(row_id, field)?;
        let column = self
            .columns
            .get(field)
            .ok_or_else(|| GridError::UnknownColumn(field.to_string()))?;
        self.edit.open(row_id.clone(), column, current)?;
        Ok(())
    }

    pub fn set_pending(&mut self, value: CellValue) -> bool {
        self.edit.set_pending(value)
    }

    /// Attempt to commit the live edit; a valid commit is propagated once.
    pub fn commit_edit(&mut self) -> CommitOutcome {
        let Some(field) = self.edit.state().map(|s| s.field.clone()) else {
            return CommitOutcome::NoActiveEdit;
        };
        let Some(column) = self.columns.get(&field) else {
            self.edit.cancel();
            return CommitOutcome::NoActiveEdit;
        };

        let outcome = self.edit.commit(column);
        if let CommitOutcome::Committed(change) = &outcome {
            self.store.propagate(change);
        }
        outcome
    }

    pub fn cancel_edit(&mut self) -> Option<EditState> {
        self.edit.cancel()
    }

    /// Focus left the editor. Commits when `commit_on_blur` is set,
    /// otherwise the edit stays open and `None` is returned.
    pub fn blur_edit(&mut self) -> Option<CommitOutcome> {
        if self.settings.commit_on_blur {
            Some(self.commit_edit())
        } else {
            None
        }
    }

    pub fn edit_phase(&self) -> EditPhase {
        self.edit.phase()
    }

    pub fn edit_state(&self) -> Option<&EditState> {
        self.edit.state()
    }

    pub fn is_edit_invalid(&self) -> bool {
        self.edit.is_invalid()
    }
}

impl std::fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("columns", &self.columns.len())
            .field("store", &self.store)
            .field("sort", &self.sort)
            .field("edit", &self.edit.phase())
            .finish()
    }
}
