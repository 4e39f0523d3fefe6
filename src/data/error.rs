//! Error types for grid operations
//!
//! Provides unified error handling for schema normalization, edit requests
//! and data/settings loading.

use thiserror::Error;

/// Errors that can occur while configuring or driving the grid
#[derive(Error, Debug)]
pub enum GridError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column was declared without a field key
    #[error("Column at position {index} has an empty field")]
    EmptyField { index: usize },

    /// Two columns share the same field key
    #[error("Duplicate column field: {0}")]
    DuplicateField(String),

    /// No column is declared for the field
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// No row with this identity in the current row set
    #[error("Unknown row: {0}")]
    UnknownRow(String),

    /// The column does not accept edits
    #[error("Column is not editable: {0}")]
    NotEditable(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for grid operations
pub type GridResult<T> = Result<T, GridError>;
