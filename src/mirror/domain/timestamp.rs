//! ISO 8601 timestamps as used by the NVD API and `syncdate.json`.
//!
//! The API returns `lastModified` values without an offset, while the
//! `lastModStartDate`/`lastModEndDate` query parameters must carry one.
//! Everything here treats naive values as UTC and renders with millisecond
//! precision and an explicit offset.

use crate::shared::error::SyncError;
use crate::shared::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

pub type Timestamp = DateTime<FixedOffset>;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Current time as a UTC timestamp
pub fn now() -> Timestamp {
    Utc::now().fixed_offset()
}

/// Parses an ISO 8601 date or datetime; values without an offset are UTC
pub fn parse_timestamp(value: &str) -> Result<Timestamp> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    Err(SyncError::Validation {
        message: format!("'{}' is not a valid ISO 8601 date or datetime", value),
    }
    .into())
}

/// Renders a timestamp as `YYYY-MM-DDTHH:MM:SS.mmm+HH:MM`
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Normalizes an optional ISO 8601 string; `None` means `now`
pub fn normalize_timestamp(value: Option<&str>, now: &Timestamp) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(format_timestamp(&parse_timestamp(value)?)),
        _ => Ok(format_timestamp(now)),
    }
}
