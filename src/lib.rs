//! Non-visual engine for a tabular data grid.
//!
//! Given a column schema and a row dataset, the engine resolves cell values,
//! orders rows by a single active sort, dispatches cells to a presentation
//! and runs inline editing with validation and commit/cancel semantics.
//! Drawing the grid is left to the host.

pub mod constants;
pub mod data;
pub mod engine;
pub mod logging;
pub mod perf;
pub mod settings;
pub mod types;

pub use data::{GridError, GridResult};
pub use engine::{
    Align, CellChange, CellKind, Column, ColumnDef, ColumnSet, ColumnType, CommitOutcome,
    DataGrid, EditPhase, EditState, PropagationMode, RenderedCell, SortDirection, SortSpec,
    SortState,
};
pub use settings::GridSettings;
pub use types::{CellValue, Row, RowId};
