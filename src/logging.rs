//! Logging setup.
//!
//! The engine only emits `tracing` events; hosts that have no subscriber of
//! their own can call [`init`] once at startup.

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `GRIDCORE_LOG`, then `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Subscriber for tests: writes through the test harness' captured output.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("gridcore=debug"))
        .with_test_writer()
        .try_init();
}
