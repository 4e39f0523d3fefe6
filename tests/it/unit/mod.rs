//! Unit tests for gridcore.

mod json_loading_tests;
mod settings_tests;
mod snapshot_tests;
