//! Crate-level error type.
//!
//! Parse-time anomalies are recovered locally by the event builder and never
//! reach this type; what surfaces to callers is "never parsed" and the
//! typed failures of the standalone resolver operations.

use thiserror::Error;

/// Errors surfaced by the weekview ICS library.
#[derive(Debug, Error)]
pub enum IcalError {
    /// Occurrences were queried before any parse was performed.
    #[error("parse an ICS text before querying occurrences")]
    NotParsed,

    /// A date or datetime literal failed to resolve.
    #[error(transparent)]
    Date(#[from] crate::ical::parse::values::DateError),

    /// An RRULE value failed to parse (all-or-nothing).
    #[error(transparent)]
    Rule(#[from] crate::ical::core::rule::RuleParseError),

    /// An event's date was requested but no start date was parsed.
    #[error(transparent)]
    MissingDate(#[from] crate::ical::core::event::MissingDateError),
}

/// Result type for weekview ICS operations.
pub type IcalResult<T> = std::result::Result<T, IcalError>;
