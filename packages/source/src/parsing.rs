//! Shared parsing utilities for raw report records.
//!
//! Date and coordinate parsing used by both record adapters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a report timestamp.
///
/// Accepts RFC 3339, naive ISO 8601 datetimes with or without fractional
/// seconds (with `T` or a space separator), and bare `YYYY-MM-DD` dates,
/// which resolve to midnight. Naive values are taken as UTC.
#[must_use]
pub fn parse_report_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Validates a lat/lng pair. Returns `None` if either is missing, zero, not
/// finite, or out of range.
#[must_use]
pub fn parse_lat_lng(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    let latitude = lat?;
    let longitude = lng?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some((latitude, longitude))
}
