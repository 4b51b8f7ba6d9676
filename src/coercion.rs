//! Best-effort parsing of form text into typed record values.
//!
//! Both functions are total: input that cannot be understood falls back to
//! `0` or `None` instead of failing the submission.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Reads a decimal number. Absent, blank, unparseable and non-finite input all give `0.0`.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Reads a date or timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` without an offset (taken as
/// UTC) and plain `YYYY-MM-DD` (UTC midnight). Anything else is `None`.
pub fn coerce_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let value = raw.map(str::trim).filter(|value| !value.is_empty())?;

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
