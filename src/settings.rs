//! Grid settings.
//!
//! Settings are plain JSON with camelCase keys. Every key is optional:
//!
//! ```json
//! {
//!   "defaultMinWidth": 120,
//!   "dateFormat": "%Y-%m-%d",
//!   "commitOnBlur": false
//! }
//! ```

use crate::constants::{
    DEFAULT_COMMIT_ON_BLUR, DEFAULT_DATE_FORMAT, DEFAULT_MIN_WIDTH, SLOW_SORT_THRESHOLD_MS,
};
use crate::data::GridResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration supplied by the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    /// `minWidth` given to columns that declare none
    pub default_min_width: f32,
    /// chrono format string for date cells
    pub date_format: String,
    /// Whether a blur attempts to commit the open edit
    pub commit_on_blur: bool,
    /// Sort recomputations slower than this are logged
    pub slow_sort_threshold_ms: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            default_min_width: DEFAULT_MIN_WIDTH,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            commit_on_blur: DEFAULT_COMMIT_ON_BLUR,
            slow_sort_threshold_ms: SLOW_SORT_THRESHOLD_MS,
        }
    }
}

impl GridSettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded grid settings");
        Ok(settings)
    }
}
