//! The grid engine.
//!
//! Leaves first: `column` normalizes the schema, `resolve` computes cell
//! values, `sort` orders rows, `render` picks a presentation, `edit` runs the
//! single-cell edit state machine and `propagate` delivers committed changes.
//! `grid` ties them together.

mod column;
mod dates;
mod edit;
mod grid;
mod propagate;
mod render;
mod resolve;
mod sort;

pub use column::*;
pub use dates::*;
pub use edit::*;
pub use grid::*;
pub use propagate::*;
pub use render::*;
pub use resolve::*;
pub use sort::*;
