//! Single home for date parsing, formatting, and calendar-month stepping.
//!
//! The application historically stored dates in two textual shapes: ISO
//! (`YYYY-MM-DD`) in the data files and day-first (`DD-MM-YYYY`) in user
//! facing fields. Every component goes through this module so "invalid
//! date" means exactly one thing.

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::OfficeError;

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Parses a date accepting ISO first, then day-first notation.
pub fn parse(text: &str) -> Result<NaiveDate, OfficeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(OfficeError::InvalidDate("empty date string".into()));
    }
    for format in [ISO_FORMAT, DISPLAY_FORMAT] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(OfficeError::InvalidDate(trimmed.to_string()))
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Steps `date` by whole calendar months, clamping to the last valid day
/// of the target month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

/// Whole months elapsed between two dates, by year/month arithmetic only.
pub fn whole_months_between(earlier: NaiveDate, later: NaiveDate) -> i32 {
    (later.year() - earlier.year()) * 12 + later.month() as i32 - earlier.month() as i32
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let day = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
