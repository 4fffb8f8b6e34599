//! Property-name token classification.
//!
//! The grammar this crate accepts is positional (BEGIN/END nesting) plus
//! token-prefix matching; every recognized property name belongs to exactly
//! one of three closed categories. Unknown names are a normal outcome, not
//! an error.

/// Category a recognized property name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    /// Calendar-level structure and timezone tokens.
    Calendar,
    /// Event-level property tokens.
    Event,
    /// Tokens of the RRULE value sub-grammar.
    Rule,
}

/// Calendar-level tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarToken {
    /// Calendar-level timezone property.
    Timezone,
    /// Component opener.
    Begin,
    /// Component closer.
    End,
    /// VEVENT marker value carried by BEGIN/END lines.
    Event,
}

impl CalendarToken {
    /// Returns the ICS spelling of this token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timezone => "TZID",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Event => "VEVENT",
        }
    }

    /// Parses a calendar token from its exact ICS spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TZID" => Some(Self::Timezone),
            "BEGIN" => Some(Self::Begin),
            "END" => Some(Self::End),
            "VEVENT" => Some(Self::Event),
            _ => None,
        }
    }
}

impl std::fmt::Display for CalendarToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event-level property tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventToken {
    /// Event title.
    Summary,
    /// Start date or datetime, possibly with parameters appended.
    DateStart,
    /// End date or datetime, possibly with parameters appended.
    DateEnd,
    /// Recurrence rule.
    Rule,
}

impl EventToken {
    /// Returns the ICS spelling of this token (base name, no parameters).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "SUMMARY",
            Self::DateStart => "DTSTART",
            Self::DateEnd => "DTEND",
            Self::Rule => "RRULE",
        }
    }

    /// Classifies a raw property name as an event token.
    ///
    /// `DTSTART` and `DTEND` match by prefix, because ICS appends property
    /// parameters to the name before the colon (`DTSTART;TZID=...`).
    #[must_use]
    pub fn classify(token: &str) -> Option<Self> {
        match token {
            "SUMMARY" => Some(Self::Summary),
            "RRULE" => Some(Self::Rule),
            _ if token.starts_with(Self::DateStart.as_str()) => Some(Self::DateStart),
            _ if token.starts_with(Self::DateEnd.as_str()) => Some(Self::DateEnd),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tokens of the RRULE value sub-grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleToken {
    /// Recurrence frequency.
    Frequency,
    /// Recurrence cutoff instant.
    Until,
    /// Recurrence interval multiplier.
    Interval,
    /// Weekday constraint.
    ByDay,
}

impl RuleToken {
    /// Returns the ICS spelling of this token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frequency => "FREQ",
            Self::Until => "UNTIL",
            Self::Interval => "INTERVAL",
            Self::ByDay => "BYDAY",
        }
    }

    /// Parses a rule token from its exact ICS spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FREQ" => Some(Self::Frequency),
            "UNTIL" => Some(Self::Until),
            "INTERVAL" => Some(Self::Interval),
            "BYDAY" => Some(Self::ByDay),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reports which category a raw property name belongs to, if any.
#[must_use]
pub fn classify(token: &str) -> Option<TokenCategory> {
    if CalendarToken::parse(token).is_some() {
        return Some(TokenCategory::Calendar);
    }
    if EventToken::classify(token).is_some() {
        return Some(TokenCategory::Event);
    }
    if RuleToken::parse(token).is_some() {
        return Some(TokenCategory::Rule);
    }
    None
}
