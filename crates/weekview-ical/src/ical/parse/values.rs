//! Date, timezone, and property-parameter resolution.
//!
//! ICS encodes zoned time two ways: a trailing `Z` marks a UTC instant that
//! must be converted into the target timezone, while a bare literal is
//! timezone-naive and gets stamped with the target timezone directly. The
//! two must not be swapped; doing so shifts every non-UTC event by the
//! wrong offset.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Result type for date and timezone resolution.
pub type DateResult<T> = Result<T, DateError>;

/// An error that occurred while resolving a date or datetime literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Not a valid 8-digit calendar date.
    #[error("invalid date literal: {0}")]
    InvalidDate(String),

    /// Not a valid datetime literal.
    #[error("invalid datetime literal: {0}")]
    InvalidDateTime(String),

    /// The wall-clock time does not exist in the target timezone (DST gap).
    #[error("nonexistent local time: {0}")]
    NonExistentLocalTime(String),
}

/// Parameters carried by a property token such as
/// `DTSTART;TZID=Asia/Tokyo;VALUE=DATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyParameters {
    /// Whether the property value is a bare date (`VALUE=DATE`).
    pub all_day: bool,
    /// Timezone override from a `TZID=` parameter.
    pub timezone: Option<Tz>,
}

/// Parses an ICS date or datetime literal into a timezone-aware instant.
///
/// With `is_date` the literal is an 8-digit `YYYYMMDD` calendar date with no
/// time component; otherwise it is a datetime literal in either the ICS
/// basic form (`20190310T090000`) or extended ISO-8601
/// (`2019-03-10T09:00:00`). A trailing `Z` means the value is a UTC instant
/// and is converted into `timezone`; without it the value is stamped with
/// `timezone` as-is.
///
/// ## Errors
///
/// Fails when the literal does not parse, or when the wall-clock time does
/// not exist in `timezone`.
pub fn parse_date(raw: &str, timezone: Tz, is_date: bool) -> DateResult<DateTime<Tz>> {
    let trimmed = raw.trim();
    let (literal, is_utc) = match trimmed.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (trimmed, false),
    };

    let naive = if is_date {
        let date = NaiveDate::parse_from_str(literal, "%Y%m%d")
            .map_err(|_| DateError::InvalidDate(raw.to_string()))?;
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| DateError::InvalidDate(raw.to_string()))?
    } else {
        parse_datetime_literal(literal)
            .ok_or_else(|| DateError::InvalidDateTime(raw.to_string()))?
    };

    if is_utc {
        // A UTC instant, converted into the target timezone.
        Ok(Utc.from_utc_datetime(&naive).with_timezone(&timezone))
    } else {
        // Timezone-naive wall-clock time, stamped with the target timezone.
        timezone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| DateError::NonExistentLocalTime(raw.to_string()))
    }
}

/// Tries the ICS basic datetime form first, then extended ISO-8601.
fn parse_datetime_literal(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Extracts the all-day flag and timezone override from a property token.
///
/// The token splits on `;`; each fragment splits on its first `=`.
/// Fragments with no `=` (including the property name itself) and fragments
/// whose TZID does not resolve are skipped individually, never fatal.
#[must_use]
pub fn property_parameters(token: &str) -> PropertyParameters {
    let mut parameters = PropertyParameters::default();

    for fragment in token.split(';') {
        let Some((key, value)) = fragment.split_once('=') else {
            continue;
        };

        match key {
            "TZID" => match Tz::from_str(value) {
                Ok(timezone) => parameters.timezone = Some(timezone),
                Err(_) => {
                    tracing::debug!(tzid = value, "skipping unresolvable TZID parameter");
                }
            },
            "VALUE" => {
                if value == "DATE" {
                    parameters.all_day = true;
                }
            }
            _ => {}
        }
    }

    parameters
}

/// Computes the half-open week window containing `instant`.
///
/// The window is `[Monday 00:00:00, next Monday 00:00:00)` in the instant's
/// own timezone. The week starts on Monday regardless of locale.
///
/// ## Errors
///
/// Fails when Monday midnight does not exist in the instant's timezone
/// (DST gap) or the date arithmetic leaves the supported range.
pub fn week_window(instant: DateTime<Tz>) -> DateResult<(DateTime<Tz>, DateTime<Tz>)> {
    let date = instant.date_naive();
    let monday = date
        .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .ok_or_else(|| DateError::InvalidDate(date.to_string()))?;
    let start_naive = monday
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DateError::InvalidDate(monday.to_string()))?;
    let end_naive = start_naive
        .checked_add_days(Days::new(7))
        .ok_or_else(|| DateError::InvalidDate(monday.to_string()))?;

    let timezone = instant.timezone();
    let start = timezone
        .from_local_datetime(&start_naive)
        .earliest()
        .ok_or_else(|| DateError::NonExistentLocalTime(start_naive.to_string()))?;
    let end = timezone
        .from_local_datetime(&end_naive)
        .earliest()
        .ok_or_else(|| DateError::NonExistentLocalTime(end_naive.to_string()))?;

    Ok((start, end))
}
