//! Serializable projection of a resolved occurrence.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::ical::expand::occurrence::Occurrence;

/// The per-occurrence output object handed to delivery layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceView {
    /// Whether the source event is an all-day event.
    pub all_day: bool,
    /// Whether the source event repeats.
    pub repeating: bool,
    /// Event title.
    pub name: String,
    /// The occurrence's begin as an ISO-8601 instant.
    pub date: String,
    /// Day of month.
    pub day: u32,
    /// Abbreviated weekday name.
    #[serde(rename = "dayLabel")]
    pub day_label: String,
    /// Year.
    pub year: i32,
    /// Month of year.
    pub month: u32,
    /// Abbreviated month name.
    #[serde(rename = "monthLabel")]
    pub month_label: String,
    /// Time of day, 24-hour "HH:MM".
    pub time: String,
}

impl From<&Occurrence> for OccurrenceView {
    fn from(occurrence: &Occurrence) -> Self {
        let begin = occurrence.begin;
        Self {
            all_day: occurrence.all_day,
            repeating: occurrence.repeating,
            name: occurrence.name.clone(),
            date: begin.to_rfc3339(),
            day: begin.day(),
            day_label: begin.format("%a").to_string(),
            year: begin.year(),
            month: begin.month(),
            month_label: begin.format("%b").to_string(),
            time: format!("{:02}:{:02}", begin.hour(), begin.minute()),
        }
    }
}
