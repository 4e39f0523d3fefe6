//! Date interpretation shared by sorting and rendering.
//!
//! An unparseable date is not an error: it reads as `None` and both callers
//! treat that exactly like a null value.

use crate::constants::{DATE_ONLY_FORMAT, DATE_TIME_FORMATS};
use crate::types::CellValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Interpret a cell value as an instant.
///
/// Text is tried as RFC 3339, then ISO-style date-times, then a plain date.
/// Numbers are milliseconds since the Unix epoch.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Text(s) => parse_date_str(s),
        CellValue::Number(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

/// Milliseconds since the Unix epoch, for ordering.
pub fn timestamp_millis(value: &CellValue) -> Option<i64> {
    parse_date(value).map(|dt| dt.and_utc().timestamp_millis())
}

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
