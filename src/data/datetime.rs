use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date formats seen in the plot data exports, most common first.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y",
];

/// Parse a date cell to a Unix timestamp in seconds.
pub fn parse_date(value: &str) -> Option<f64> {
    let value = value.trim();
    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.and_utc().timestamp() as f64);
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64);
        }
    }
    None
}

/// Format a timestamp for axis ticks: `YYYY-MM-DD`.
pub fn format_date(ts: f64) -> String {
    match DateTime::<Utc>::from_timestamp(ts.floor() as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => format!("{ts:.0}"),
    }
}

/// Format a timestamp for the hover legend: `Tue Jun 01 1999`.
pub fn format_date_long(ts: f64) -> String {
    match DateTime::<Utc>::from_timestamp(ts.floor() as i64, 0) {
        Some(dt) => dt.format("%a %b %d %Y").to_string(),
        None => format!("{ts:.0}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates() {
        let ts = parse_date("1999-06-01").unwrap();
        assert_eq!(format_date(ts), "1999-06-01");
        assert_eq!(format_date_long(ts), "Tue Jun 01 1999");
    }

    #[test]
    fn parses_datetime_and_us_styles() {
        assert_eq!(parse_date("1999-06-01 12:00:00"), Some(928238400.0));
        assert_eq!(parse_date("06/01/1999"), parse_date("1999-06-01"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }
}
