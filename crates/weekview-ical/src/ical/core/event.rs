//! Event records and the parsed-calendar value.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use thiserror::Error;

use super::rule::Rule;

/// An event's date was requested but no start date was ever parsed.
///
/// Indicates a malformed event. Downstream queries exclude such events
/// rather than failing the whole calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event has no start date")]
pub struct MissingDateError;

/// A single calendar event, accumulated from the lines of one VEVENT block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    /// Whether the event is an all-day event (VALUE=DATE).
    pub all_day: bool,
    /// Recurrence rule, when a valid RRULE was present.
    pub rule: Option<Rule>,
    /// Start instant.
    pub begin: Option<DateTime<Tz>>,
    /// End instant.
    pub end: Option<DateTime<Tz>>,
    /// Event title from SUMMARY.
    pub name: String,
}

impl Event {
    /// The event's date, i.e. its start instant.
    ///
    /// ## Errors
    ///
    /// Fails with [`MissingDateError`] when no start date was parsed;
    /// absence is an error here, never a default.
    pub fn date(&self) -> Result<DateTime<Tz>, MissingDateError> {
        self.begin.ok_or(MissingDateError)
    }

    /// Whether the event repeats, i.e. carries a recurrence rule.
    #[must_use]
    pub fn repeating(&self) -> bool {
        self.rule.is_some()
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.begin {
            Some(begin) => write!(
                f,
                "{} {} {} {}",
                begin.format("%b"),
                begin.day(),
                begin.format("%H:%M"),
                self.name
            ),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The value produced by one parse of an ICS text.
///
/// Owned by the caller and passed explicitly into the occurrence resolver;
/// there is no shared or process-wide parse state, so concurrent parses and
/// queries each operate on their own `Calendar`.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    /// Parsed events, in parse order.
    pub events: Vec<Event>,
    /// The last calendar-level TZID seen, or UTC if none.
    pub timezone: Tz,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            timezone: chrono_tz::UTC,
        }
    }
}
