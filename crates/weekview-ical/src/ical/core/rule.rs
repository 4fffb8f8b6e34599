//! Recurrence rule model for the RRULE subset this crate understands.
//!
//! DAILY expansion, BYDAY constraints, and INTERVAL multipliers are parsed
//! so that rules carrying them can be recognized, but they are deliberately
//! not expanded (see the occurrence resolver).

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use super::token::RuleToken;
use crate::ical::parse::values::{self, DateError};

/// An error that occurred while parsing an RRULE value.
///
/// Rule parsing is all-or-nothing: any failure discards the entire rule,
/// including components already parsed from the same value.
#[derive(Debug, Error)]
pub enum RuleParseError {
    /// The FREQ component named an unknown frequency.
    #[error("unrecognized FREQ value: {0}")]
    UnrecognizedFrequency(String),

    /// The rule carried no FREQ component at all.
    #[error("rule has no FREQ component")]
    MissingFrequency,

    /// The UNTIL component did not parse as a date.
    #[error("invalid UNTIL value: {0}")]
    InvalidUntil(#[from] DateError),
}

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every year.
    Yearly,
}

impl Frequency {
    /// Parses a frequency from its ICS spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Returns the lowercase name of this frequency.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Yearly => "yearly",
        }
    }

    /// Canonical base duration of one period (1 day / 7 days / 365 days).
    ///
    /// Used for interval math and documentation, not for exact calendar
    /// semantics.
    #[must_use]
    pub fn base_duration(self) -> TimeDelta {
        match self {
            Self::Daily => TimeDelta::days(1),
            Self::Weekly => TimeDelta::days(7),
            Self::Yearly => TimeDelta::days(365),
        }
    }
}

/// Weekday as spelled by the ICS BYDAY component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Parses a weekday from its two-letter ICS code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            "SU" => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Returns the two-letter ICS code for this weekday.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// Returns the lowercase English name of this weekday.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

/// A parsed recurrence rule.
///
/// A `Rule` always carries a frequency; rules whose FREQ fails to parse are
/// never constructed. Treated as immutable once attached to an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Recurrence frequency (required).
    pub frequency: Frequency,
    /// Instant after which the recurrence no longer applies.
    pub until: Option<DateTime<Tz>>,
    /// Interval multiplier between periods.
    pub interval: Option<u32>,
    /// Weekday constraint.
    pub by_day: Option<Weekday>,
}

impl Rule {
    /// Parses an RRULE value such as `FREQ=WEEKLY;UNTIL=20260101T000000Z`.
    ///
    /// The value splits on `;`, each segment on its first `=`. Unrecognized
    /// keys and segments with no `=` are ignored individually. `UNTIL` is
    /// resolved against `timezone`.
    ///
    /// ## Errors
    ///
    /// Fails when FREQ is missing or names an unknown frequency, or when
    /// UNTIL does not parse. Failure discards the whole rule.
    pub fn parse(content: &str, timezone: Tz) -> Result<Self, RuleParseError> {
        let mut frequency = None;
        let mut until = None;
        let mut interval = None;
        let mut by_day = None;

        for segment in content.split(';') {
            let Some((key, value)) = segment.trim().split_once('=') else {
                continue;
            };

            match RuleToken::parse(key) {
                Some(RuleToken::Frequency) => {
                    frequency = Some(Frequency::parse(value).ok_or_else(|| {
                        RuleParseError::UnrecognizedFrequency(value.to_string())
                    })?);
                }
                Some(RuleToken::Until) => {
                    until = Some(values::parse_date(value, timezone, false)?);
                }
                Some(RuleToken::Interval) => {
                    interval = value.parse().ok();
                }
                Some(RuleToken::ByDay) => {
                    by_day = Weekday::parse(value);
                }
                None => {}
            }
        }

        let frequency = frequency.ok_or(RuleParseError::MissingFrequency)?;

        Ok(Self {
            frequency,
            until,
            interval,
            by_day,
        })
    }

    /// Whether the recurrence has already run out.
    ///
    /// True iff `until` is set and lies strictly before the current instant.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.until.is_some_and(|until| Utc::now() > until)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Repeating ")?;
        if let Some(interval) = self.interval {
            write!(f, "every {interval} ")?;
        }
        write!(f, "{}", self.frequency.name())?;
        if let Some(by_day) = self.by_day {
            write!(f, " on the {}", by_day.name())?;
        }
        if self.finished() {
            write!(f, " (finished)")?;
        }
        write!(f, ".")
    }
}
