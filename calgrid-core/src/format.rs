//! Date and time labels.
//!
//! Two date formats exist and are never interchangeable: the storage key
//! (`YYYY-MM-DD`) partitions events and is compared against grid cells, the
//! display key (`DD/MM/YYYY`) only ever ends up in front of a human.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::error::ValidationError;

const STORAGE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Weekday header labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `2024-03-05`
pub fn storage_key(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

pub fn parse_storage_key(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::EmptyDate);
    }
    NaiveDate::parse_from_str(s, STORAGE_FORMAT).map_err(|_| ValidationError::InvalidDate(s.into()))
}

/// `05/03/2024`
pub fn display_key(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parse a 24-hour `HH:MM` time.
pub fn parse_time(s: &str) -> Result<NaiveTime, ValidationError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| ValidationError::InvalidTime(s.into()))
}

/// Render a time as `H:MM AM|PM`. Midnight and noon both show hour 12.
pub fn format_time(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    let suffix = if pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, time.minute(), suffix)
}

/// Same as [`format_time`] for raw `HH:MM` input. Empty or unparseable
/// input yields an empty label.
pub fn format_time_str(s: &str) -> String {
    parse_time(s).map(format_time).unwrap_or_default()
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_storage_key_is_zero_padded() {
        assert_eq!(storage_key(date(2024, 3, 5)), "2024-03-05");
        assert_eq!(storage_key(date(999, 12, 31)), "0999-12-31");
    }

    #[test]
    fn test_display_key_is_day_first() {
        assert_eq!(display_key(date(2024, 3, 5)), "05/03/2024");
    }

    #[test]
    fn test_parse_storage_key() {
        assert_eq!(parse_storage_key("2024-02-29"), Ok(date(2024, 2, 29)));
        assert_eq!(parse_storage_key(""), Err(ValidationError::EmptyDate));
        assert_eq!(
            parse_storage_key("2023-02-29"),
            Err(ValidationError::InvalidDate("2023-02-29".into()))
        );
        assert!(parse_storage_key("05/03/2024").is_err());
    }

    #[test]
    fn test_format_time_12_hour() {
        assert_eq!(format_time_str("09:30"), "9:30 AM");
        assert_eq!(format_time_str("00:05"), "12:05 AM");
        assert_eq!(format_time_str("12:00"), "12:00 PM");
        assert_eq!(format_time_str("13:45"), "1:45 PM");
        assert_eq!(format_time_str("23:59"), "11:59 PM");
    }

    #[test]
    fn test_format_time_empty_input() {
        assert_eq!(format_time_str(""), "");
        assert_eq!(format_time_str("noon"), "");
    }

    #[test]
    fn test_labels() {
        assert_eq!(weekday_label(date(2024, 3, 3)), "Sun");
        assert_eq!(weekday_label(date(2024, 3, 9)), "Sat");
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
    }
}
