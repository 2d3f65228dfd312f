//! Date handling for the hourly climate model.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Date format accepted on the request surface.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, falling back to today's UTC date when the
/// string is malformed.
pub fn parse_date_or_today(s: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            let today = Utc::now().date_naive();
            warn!(
                input = s,
                error = %e,
                fallback = %today,
                "Malformed date, using current date"
            );
            today
        }
    }
}

/// Day of year, 1-based.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// 12-hour clock label for an hour of day: 0 -> "12:00 AM", 13 -> "1:00 PM".
pub fn hour_label(hour: u32) -> String {
    let hour_12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    let ampm = if hour < 12 { "AM" } else { "PM" };
    format!("{}:00 {}", hour_12, ampm)
}

/// UTC instant at the top of `hour` on `date`.
pub fn hour_timestamp(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(hour.min(23), 0, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    Utc.from_utc_datetime(&naive)
}

/// An inclusive date range for observation queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date >= &self.start && date <= &self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_date_or_today("2025-05-25");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 5, 25).unwrap());
    }

    #[test]
    fn test_parse_malformed_date_falls_back_to_today() {
        let before = Utc::now().date_naive();
        let date = parse_date_or_today("25/05/2025");
        let after = Utc::now().date_naive();
        assert!(date == before || date == after);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), 1);
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2025, 5, 25).unwrap()), 145);
        assert_eq!(day_of_year(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 366);
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(0), "12:00 AM");
        assert_eq!(hour_label(1), "1:00 AM");
        assert_eq!(hour_label(11), "11:00 AM");
        assert_eq!(hour_label(12), "12:00 PM");
        assert_eq!(hour_label(13), "1:00 PM");
        assert_eq!(hour_label(23), "11:00 PM");
    }

    #[test]
    fn test_hour_timestamp_has_utc_offset() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        assert_eq!(
            hour_timestamp(date, 13).to_rfc3339(),
            "2025-05-25T13:00:00+00:00"
        );
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
        );
        assert!(range.contains(&NaiveDate::from_ymd_opt(2025, 5, 25).unwrap()));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
    }
}
