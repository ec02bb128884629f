//! Calendar-date helpers
//!
//! All dates in the system are day-granular `NaiveDate`s written as
//! `YYYY-MM-DD` on every external surface (query strings, remote source
//! parameters, SQL).

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::CoreError;

/// Wire format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date
///
/// Leading and trailing whitespace is ignored. A time suffix such as
/// `2022-04-11 00:00:00` is accepted and truncated to the date.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if the value is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| CoreError::invalid_date(value))
}

/// Parses an optional date where absent and blank values both mean "unbounded"
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if a non-blank value does not parse.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v).map(Some),
    }
}

/// Formats a date for the wire
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Adds whole calendar months, keeping the day-of-month
///
/// A day the target month does not have rolls over into the following month
/// (Jan 31 + 1 month = Mar 3 in 2022, Mar 2 in a leap year), so repeated
/// monthly steps are taken from the previous result.
///
/// # Errors
///
/// Returns `CoreError::DateOverflow` if the result is out of chrono's range.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, CoreError> {
    let overflow = || CoreError::DateOverflow(format!("{} + {} months", date, months));

    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(months)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day() - 1))))
        .ok_or_else(overflow)
}
