//! Tolerant ICS parsing and week-window occurrence resolution.
//!
//! This crate ingests a raw iCalendar text blob and resolves the events
//! falling within a Monday-aligned week window, expanding simple yearly and
//! weekly recurrences into concrete occurrences. It deliberately implements
//! a tolerant subset of RFC 5545: malformed or unknown lines are skipped,
//! never fatal, and DAILY/BYDAY/INTERVAL recurrence is recognized but not
//! expanded.
//!
//! Parsing yields an owned [`Calendar`] value that callers thread into the
//! occurrence resolver explicitly; there is no shared parse state.

pub mod error;
pub mod ical;
pub mod projection;

pub use error::{IcalError, IcalResult};
pub use ical::core::event::{Calendar, Event, MissingDateError};
pub use ical::core::rule::{Frequency, Rule, RuleParseError, Weekday};
pub use ical::expand::occurrence::{current_week, included, Occurrence};
pub use ical::parse::parser::parse;
pub use ical::parse::values::{parse_date, property_parameters, week_window};
pub use projection::OccurrenceView;
