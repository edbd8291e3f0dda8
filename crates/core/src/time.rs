//! UTC timestamp parsing for client-supplied booking times.
//!
//! Clients send ISO 8601 timestamps either with an explicit offset
//! (`2025-05-20T14:00:00Z`, `2025-05-20T16:00:00+02:00`) or naive
//! (`2025-05-20T14:00:00`). Naive values are interpreted as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Parse a client-supplied timestamp as a UTC instant.
pub fn parse_utc_instant(raw: &str) -> Result<Timestamp, CoreError> {
    let value = raw.trim();

    if let Ok(dt) = value.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    if let Ok(naive) = value.parse::<NaiveDateTime>() {
        return Ok(naive.and_utc());
    }

    Err(CoreError::Validation(format!(
        "Invalid timestamp: {value}. Use ISO 8601 (e.g. 2025-05-20T14:00:00)"
    )))
}
