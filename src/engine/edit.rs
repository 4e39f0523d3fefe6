//! Inline cell editing.
//!
//! The grid owns exactly one [`EditSession`], and the session holds at most
//! one live [`EditState`]. Opening another cell cancels the current edit
//! first, so two edits can never be live at once.
//!
//! ```text
//! idle --open--> editing --commit--> validating --valid--> committed -> idle
//!                   ^                     |
//!                   +------invalid--------+
//! editing --cancel--> cancelled -> idle
//! ```

use crate::data::{GridError, GridResult};
use crate::engine::column::Column;
use crate::types::{CellValue, RowId};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditPhase {
    #[default]
    Idle,
    Editing,
    Validating,
    Committed,
    Cancelled,
}

/// The cell under edit.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    pub row_id: RowId,
    pub field: String,
    pub original_value: CellValue,
    pub pending_value: CellValue,
    pub phase: EditPhase,
    /// Set when the last commit attempt failed validation
    pub invalid: bool,
}

/// A committed change, ready to propagate.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellChange {
    pub row_id: RowId,
    pub field: String,
    pub value: CellValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    /// Validation passed; the change must be propagated exactly once
    Committed(CellChange),
    /// Validation failed; the edit stays open and flagged
    Invalid,
    NoActiveEdit,
}

/// Holder of the single live edit.
#[derive(Debug, Default)]
pub struct EditSession {
    live: Option<EditState>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `column` of `row_id` for editing, seeded with `current`.
    ///
    /// Returns the edit that was force-cancelled to make room, if any.
    /// Re-opening the cell already under edit keeps its pending value.
    pub fn open(
        &mut self,
        row_id: RowId,
        column: &Column,
        current: CellValue,
    ) -> GridResult<Option<EditState>> {
        if !column.editable {
            return Err(GridError::NotEditable(column.field.clone()));
        }
        if self.is_editing(&row_id, &column.field) {
            return Ok(None);
        }

        let displaced = self.cancel();
        if let Some(prev) = &displaced {
            tracing::debug!(row = %prev.row_id, field = %prev.field, "Edit displaced by new edit");
        }

        tracing::debug!(row = %row_id, field = %column.field, "Edit opened");
        self.live = Some(EditState {
            row_id,
            field: column.field.clone(),
            pending_value: current.clone(),
            original_value: current,
            phase: EditPhase::Editing,
            invalid: false,
        });
        Ok(displaced)
    }

    /// Replace the pending value. Clears the invalid flag. No-op when idle.
    pub fn set_pending(&mut self, value: CellValue) -> bool {
        match &mut self.live {
            Some(state) => {
                state.pending_value = value;
                state.invalid = false;
                true
            }
            None => false,
        }
    }

    /// Attempt to commit against `column` (the column of the live edit).
    pub fn commit(&mut self, column: &Column) -> CommitOutcome {
        let Some(mut state) = self.live.take() else {
            return CommitOutcome::NoActiveEdit;
        };
        debug_assert_eq!(state.field, column.field);

        state.phase = EditPhase::Validating;
        if column.validate(&state.pending_value) {
            state.phase = EditPhase::Committed;
            tracing::debug!(row = %state.row_id, field = %state.field, "Edit committed");
            CommitOutcome::Committed(CellChange {
                row_id: state.row_id,
                field: state.field,
                value: state.pending_value,
            })
        } else {
            tracing::debug!(row = %state.row_id, field = %state.field, "Edit rejected by validator");
            state.phase = EditPhase::Editing;
            state.invalid = true;
            self.live = Some(state);
            CommitOutcome::Invalid
        }
    }

    /// Discard the live edit. The returned state carries the `Cancelled` phase.
    pub fn cancel(&mut self) -> Option<EditState> {
        let mut state = self.live.take()?;
        state.phase = EditPhase::Cancelled;
        state.pending_value = state.original_value.clone();
        tracing::debug!(row = %state.row_id, field = %state.field, "Edit cancelled");
        Some(state)
    }

    pub fn phase(&self) -> EditPhase {
        self.live.as_ref().map_or(EditPhase::Idle, |s| s.phase)
    }

    pub fn state(&self) -> Option<&EditState> {
        self.live.as_ref()
    }

    pub fn is_invalid(&self) -> bool {
        self.live.as_ref().is_some_and(|s| s.invalid)
    }

    pub fn is_editing(&self, row_id: &RowId, field: &str) -> bool {
        self.live
            .as_ref()
            .is_some_and(|s| &s.row_id == row_id && s.field == field)
    }
}
