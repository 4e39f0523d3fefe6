//! Data loading and error handling
//!
//! ## Error Handling
//!
//! All fallible operations return `GridResult<T>` which uses the `GridError` type.
//! Common errors include:
//! - `EmptyField` / `DuplicateField`: rejected column schema
//! - `NotEditable` / `UnknownColumn` / `UnknownRow`: refused edit requests
//! - `Io` / `Json`: file system and parse errors

mod error;
mod json_parser;

pub use error::*;
pub use json_parser::*;
