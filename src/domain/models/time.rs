//! Epoch-second parsing and formatting shared by filters, the submission
//! normalizer, and list decoration.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Formats accepted for user-entered calendar values, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date-like string into whole seconds since the Unix epoch.
///
/// Accepts RFC 3339 timestamps as well as the common calendar-picker
/// formats above; bare dates resolve to local midnight. Returns `None`
/// when the value does not look like a date, so callers can leave the
/// original field untouched.
pub fn parse_datetime_secs(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Local.from_local_datetime(&naive).single().map(|dt| dt.timestamp());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&naive).single().map(|dt| dt.timestamp());
        }
    }

    None
}

/// Format an epoch-seconds field for display, or `-` when the backend
/// omitted it (zero/negative is treated as absent).
pub fn format_epoch(secs: i64) -> String {
    if secs <= 0 {
        return "-".to_string();
    }
    match Local.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(parse_datetime_secs("1970-01-01T00:01:00Z"), Some(60));
    }

    #[test]
    fn test_parse_calendar_datetime() {
        // Local-zone value; only assert it parsed to something plausible.
        let secs = parse_datetime_secs("2024-06-01 12:30:00").unwrap();
        assert!(secs > 1_600_000_000);
    }

    #[test]
    fn test_parse_bare_date() {
        assert!(parse_datetime_secs("2024-06-01").is_some());
    }

    #[test]
    fn test_parse_rejects_non_dates() {
        assert_eq!(parse_datetime_secs("player_42"), None);
        assert_eq!(parse_datetime_secs(""), None);
        assert_eq!(parse_datetime_secs("not a date"), None);
    }

    #[test]
    fn test_format_zero_is_placeholder() {
        assert_eq!(format_epoch(0), "-");
        assert_eq!(format_epoch(-5), "-");
    }

    #[test]
    fn test_format_nonzero() {
        assert_ne!(format_epoch(1_700_000_000), "-");
    }
}
