//! Timestamp normalization
//!
//! Loaded blocks display their timestamp as ISO-8601, the node reports hex
//! seconds, and edits may supply either form or plain decimal seconds. All of
//! them collapse to decimal Unix seconds before numeric encoding.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use super::numeric::parse_u64;

/// Zone-less layouts accepted after RFC 3339 fails. Read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Normalize a timestamp to a decimal Unix-seconds string.
///
/// Accepts `0x` hex seconds, an ISO-8601 date-time, or decimal seconds.
/// Anything else, including dates before the epoch, normalizes to `"0"`.
pub fn normalize_timestamp(value: &str) -> String {
    let value = value.trim();

    let is_hex = value.starts_with("0x") || value.starts_with("0X");
    let secs = if !is_hex && value.contains('T') {
        parse_iso8601(value).and_then(|secs| u64::try_from(secs).ok())
    } else {
        parse_u64(value)
    };

    match secs {
        Some(secs) => secs.to_string(),
        None => {
            tracing::warn!(timestamp = value, "invalid timestamp format, using 0");
            "0".to_string()
        }
    }
}

/// Render Unix seconds the way loaded blocks display them.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "0".to_string())
}

fn parse_iso8601(value: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc().timestamp())
}
