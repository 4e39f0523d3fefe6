//! Engine-wide constants.
//!
//! Centralizes default values so settings, column normalization and the
//! data loaders agree on them.

// ============================================================================
// Column Defaults
// ============================================================================

/// Minimum column width in pixels when a column declares none
pub const DEFAULT_MIN_WIDTH: f32 = 200.0;

// ============================================================================
// Display
// ============================================================================

/// chrono format used for date cells (month/day/year, no zero padding)
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Date-time layouts accepted by date columns, tried in order after RFC 3339
pub const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layout accepted by date columns
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Editing
// ============================================================================

/// Whether losing focus commits the open edit
pub const DEFAULT_COMMIT_ON_BLUR: bool = true;

// ============================================================================
// Performance
// ============================================================================

/// Sort recomputations slower than this are logged
pub const SLOW_SORT_THRESHOLD_MS: f64 = 16.67;

// ============================================================================
// Data Loading
// ============================================================================

/// Keys under which a JSON payload may wrap its row array
pub const JSON_WRAPPER_KEYS: &[&str] = &["data", "rows", "items", "records", "results"];

// ============================================================================
// Logging
// ============================================================================

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "GRIDCORE_LOG";

/// Filter used when neither `GRIDCORE_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "warn";
