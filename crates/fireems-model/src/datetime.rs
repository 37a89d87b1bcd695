//! Lenient date/time parsing for CAD exports.
//!
//! CAD systems emit dates in whatever format the vendor picked: ISO 8601,
//! US `MM/DD/YYYY`, RFC 2822, month names. This module accepts the common
//! shapes and returns a `NaiveDateTime` (dates alone become midnight).
//! Timezone-qualified values are normalised to UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%B %d, %Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

/// Parse a date or date/time string.
///
/// Returns `None` for empty input, bare numbers and anything that is not a
/// recognisable calendar date.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }
    // Bare numbers ("42", "2024") are not dates.
    if trimmed.parse::<f64>().is_ok() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Some(stripped) = trimmed.strip_suffix('Z') {
        if let Some(dt) = try_datetime_formats(stripped) {
            return Some(dt);
        }
    }
    if let Some(dt) = try_datetime_formats(trimmed) {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// True when [`parse_datetime`] accepts the value.
pub fn is_datetime(value: &str) -> bool {
    parse_datetime(value).is_some()
}

fn try_datetime_formats(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_iso_dates_and_datetimes() {
        assert_eq!(parse_datetime("2024-01-15"), Some(ymd_hms(2024, 1, 15, 0, 0, 0)));
        assert_eq!(
            parse_datetime("2024-01-15T10:30:00"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_datetime("2024-01-15 10:30"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
        assert_eq!(
            parse_datetime("2024-01-15T10:30:00Z"),
            Some(ymd_hms(2024, 1, 15, 10, 30, 0))
        );
    }

    #[test]
    fn parses_us_dates() {
        assert_eq!(parse_datetime("01/15/2024"), Some(ymd_hms(2024, 1, 15, 0, 0, 0)));
        assert_eq!(parse_datetime("1/5/24"), Some(ymd_hms(2024, 1, 5, 0, 0, 0)));
        assert_eq!(
            parse_datetime("01/15/2024 02:05 PM"),
            Some(ymd_hms(2024, 1, 15, 14, 5, 0))
        );
    }

    #[test]
    fn parses_month_names() {
        assert_eq!(parse_datetime("Jan 15, 2024"), Some(ymd_hms(2024, 1, 15, 0, 0, 0)));
        assert_eq!(parse_datetime("15 March 2024"), Some(ymd_hms(2024, 3, 15, 0, 0, 0)));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("42"), None);
        assert_eq!(parse_datetime("2024"), None);
        assert_eq!(parse_datetime("Engine 12"), None);
        assert_eq!(parse_datetime("13/45/2024"), None);
    }
}
