//! Effort date parsing and calendar feature extraction.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an effort date in any of the accepted export formats.
/// Timestamps with an offset keep their local calendar date.
pub fn parse_effort_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Calendar features of a single date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarParts {
    pub year: f64,
    pub month: f64,
    pub day: f64,
    /// Monday = 0.
    pub weekday: f64,
    /// ISO 8601 week number.
    pub week_of_year: f64,
}

impl CalendarParts {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: f64::from(date.year()),
            month: f64::from(date.month()),
            day: f64::from(date.day()),
            weekday: f64::from(date.weekday().num_days_from_monday()),
            week_of_year: f64::from(date.iso_week().week()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_every_export_format() {
        let expected = ymd(2024, 3, 15);
        for raw in [
            "2024-03-15",
            "2024-03-15T08:30:00",
            "2024-03-15T08:30:00.250",
            "2024-03-15T08:30:00Z",
            "2024-03-15T08:30:00+02:00",
            "2024-03-15 08:30:00",
            "15.03.2024",
            "03/15/2024",
        ] {
            assert_eq!(parse_effort_date(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_effort_date(""), None);
        assert_eq!(parse_effort_date("not a date"), None);
        assert_eq!(parse_effort_date("2024-13-40"), None);
    }

    #[test]
    fn weekday_is_monday_based_and_week_is_iso() {
        // 2024-01-01 is a Monday in ISO week 1.
        let parts = CalendarParts::from_date(ymd(2024, 1, 1));
        assert_eq!(parts.weekday, 0.0);
        assert_eq!(parts.week_of_year, 1.0);

        // 2023-01-01 is a Sunday belonging to ISO week 52 of 2022.
        let parts = CalendarParts::from_date(ymd(2023, 1, 1));
        assert_eq!(parts.weekday, 6.0);
        assert_eq!(parts.week_of_year, 52.0);
        assert_eq!(parts.year, 2023.0);
    }
}
