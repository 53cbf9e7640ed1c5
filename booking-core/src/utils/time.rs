//! Time helpers — calendar dates and times of day
//!
//! Dates and times of day travel as strings (`YYYY-MM-DD`, `HH:MM`);
//! timestamps are i64 Unix millis. Conversion happens at the service
//! boundary, repositories only see the storage representations.

use chrono::{Datelike, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use shared::{AppError, AppResult};

/// Parse a calendar date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a time-of-day string (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// Uppercase weekday name used by the weekly schedule (MONDAY .. SUNDAY)
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "MONDAY",
        chrono::Weekday::Tue => "TUESDAY",
        chrono::Weekday::Wed => "WEDNESDAY",
        chrono::Weekday::Thu => "THURSDAY",
        chrono::Weekday::Fri => "FRIDAY",
        chrono::Weekday::Sat => "SATURDAY",
        chrono::Weekday::Sun => "SUNDAY",
    }
}

/// Today's date in the business timezone
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Validate that a date is not in the past (business timezone)
pub fn validate_not_past(date: NaiveDate, tz: Tz) -> AppResult<()> {
    let today = today_in(tz);
    if date < today {
        return Err(AppError::validation(format!(
            "Date {} is in the past (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// Format a time of day back to its storage representation (HH:MM)
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
