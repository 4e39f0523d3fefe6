//! Sort timing.
//!
//! `DataGrid` times every display-order recomputation with
//! [`measure_and_log`] and keeps a running [`OperationStats`] tally, readable
//! through `DataGrid::sort_stats`. Recomputations slower than
//! `GridSettings::slow_sort_threshold_ms` are reported at `warn`.
//!
//! Building with the `profiling` feature additionally traces the sort itself:
//! ```toml
//! [dependencies]
//! gridcore = { features = ["profiling"] }
//! ```

use std::time::Instant;
use tracing::warn;

/// Trace the duration of the enclosing scope. Expands to nothing unless the
/// `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

pub use profile_scope;

// ============================================================================
// Statistics
// ============================================================================

/// Running totals for one kind of timed operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationStats {
    count: u64,
    total_ms: f64,
    max_ms: f64,
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        self.count += 1;
        self.total_ms += ms;
        self.max_ms = self.max_ms.max(ms);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean duration in milliseconds; zero before the first sample.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }
}

// ============================================================================
// Timers
// ============================================================================

/// Emits a `trace` event with the elapsed time when dropped.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        tracing::trace!(operation = self.name, elapsed_ms = self.elapsed_ms(), "Scope timed");
    }
}

/// Run `f`, returning its result and the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}

/// Like [`measure`], warning when the run exceeds `threshold_ms`.
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> (T, f64) {
    let (result, elapsed_ms) = measure(f);
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", threshold_ms),
            "Slow operation"
        );
    }
    (result, elapsed_ms)
}
