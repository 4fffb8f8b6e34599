//! Tolerant line-oriented ICS event builder.
//!
//! A state machine over the text's lines: either no event is in progress or
//! one partial event is being accumulated, with an ambient default timezone
//! discovered along the way. One bad line never aborts the scan; malformed
//! or unknown input is skipped and logged.

use std::str::FromStr;

use chrono_tz::Tz;

use super::values::{parse_date, property_parameters};
use crate::ical::core::event::{Calendar, Event};
use crate::ical::core::rule::Rule;
use crate::ical::core::token::{classify, CalendarToken, EventToken};

/// Parses an ICS text into a fresh [`Calendar`] value.
///
/// Each call produces an independently owned result; a second parse
/// replaces rather than merges. Lines are trimmed and split on the first
/// colon; lines with no colon or with a property name outside the closed
/// token categories are skipped silently.
#[must_use]
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> Calendar {
    let mut events: Vec<Event> = Vec::new();
    let mut timezone: Tz = chrono_tz::UTC;
    let mut current: Option<Event> = None;

    for line in input.lines() {
        let line = line.trim();
        let Some((token, content)) = line.split_once(':') else {
            continue;
        };
        if classify(token).is_none() {
            continue;
        }

        // Calendar-level timezone applies to all subsequent parsing that
        // carries no TZID parameter of its own.
        if token == CalendarToken::Timezone.as_str() {
            match Tz::from_str(content) {
                Ok(tz) => timezone = tz,
                Err(_) => {
                    tracing::debug!(tzid = content, "skipping unresolvable calendar timezone");
                }
            }
        }

        let is_event_marker = content == CalendarToken::Event.as_str();
        if token == CalendarToken::Begin.as_str() && is_event_marker {
            if current.is_some() {
                tracing::warn!("BEGIN:VEVENT without matching END, discarding partial event");
            }
            current = Some(Event::default());
            continue;
        }
        if token == CalendarToken::End.as_str() && is_event_marker {
            if let Some(event) = current.take() {
                events.push(event);
            }
            continue;
        }

        let Some(event) = current.as_mut() else {
            continue;
        };

        match EventToken::classify(token) {
            Some(EventToken::Summary) => {
                event.name = content.replace('\\', "");
            }
            Some(EventToken::DateStart) => {
                let parameters = property_parameters(token);
                event.all_day = parameters.all_day;
                match parse_date(
                    content,
                    parameters.timezone.unwrap_or(timezone),
                    parameters.all_day,
                ) {
                    Ok(begin) => event.begin = Some(begin),
                    Err(error) => tracing::debug!(%error, "skipping malformed DTSTART line"),
                }
            }
            Some(EventToken::DateEnd) => {
                let parameters = property_parameters(token);
                event.all_day = parameters.all_day;
                match parse_date(
                    content,
                    parameters.timezone.unwrap_or(timezone),
                    parameters.all_day,
                ) {
                    Ok(end) => event.end = Some(end),
                    Err(error) => tracing::debug!(%error, "skipping malformed DTEND line"),
                }
            }
            Some(EventToken::Rule) => match Rule::parse(content, timezone) {
                Ok(rule) => event.rule = Some(rule),
                Err(error) => {
                    tracing::debug!(%error, "discarding RRULE, event treated as non-repeating");
                }
            },
            None => {}
        }
    }

    tracing::debug!(events = events.len(), %timezone, "parsed ICS text");

    Calendar { events, timezone }
}
