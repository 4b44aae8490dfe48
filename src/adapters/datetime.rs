//! Timestamp parsing shared by the SQLite and CSV adapters.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Parse a timestamp in one of the formats found in stored rows and CSV
/// exports.
///
/// Supports:
/// - RFC3339: "2025-10-29T17:28:13Z", "2025-10-29T17:28:13+02:00"
/// - `SQLite` default: "2025-10-29 17:28:13"
/// - ISO 8601 without timezone: "2025-10-29T17:28:13"
///
/// Naive forms are interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc));
    }

    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc));
    }

    // Surface the RFC3339 error, the preferred format
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Display form: whole seconds print without a fraction, sub-second values
/// keep their digits.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Storage form. Fixed-width nanoseconds, so lexicographic order matches
/// chronological order.
pub fn storage_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
