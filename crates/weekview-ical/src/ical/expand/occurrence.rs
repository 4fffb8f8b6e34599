//! Week-window occurrence resolution.
//!
//! Expansion never mutates the parsed calendar: stored events are read-only
//! inputs and every resolved occurrence is a newly constructed value, so
//! repeated queries against the same calendar always agree.
//!
//! Two boundary behaviors are intentional and load-bearing: direct
//! inclusion is strict on both window ends, and yearly candidates are
//! compared against the event's own begin/end rather than the window.
//! See DESIGN.md before changing either.

use chrono::{DateTime, Datelike, Days, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{IcalError, IcalResult};
use crate::ical::core::event::{Calendar, Event};
use crate::ical::core::rule::{Frequency, Rule};
use crate::ical::parse::values::week_window;

/// One concrete, dated instance of an event inside a window: either the
/// event itself or one expansion of a repeating event.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    /// Whether the source event is an all-day event.
    pub all_day: bool,
    /// Whether the source event carries a recurrence rule.
    pub repeating: bool,
    /// Event title.
    pub name: String,
    /// Start instant of this occurrence (possibly recomputed).
    pub begin: DateTime<Tz>,
    /// End instant of this occurrence, when one could be derived.
    pub end: Option<DateTime<Tz>>,
}

impl Occurrence {
    fn new(event: &Event, begin: DateTime<Tz>, end: Option<DateTime<Tz>>) -> Self {
        Self {
            all_day: event.all_day,
            repeating: event.repeating(),
            name: event.name.clone(),
            begin,
            end,
        }
    }
}

/// Resolves the occurrences intersecting the window `[start, end)`.
///
/// Direct events are included when `begin > window_start` and
/// `end < window_end`, strictly on both ends; an event exactly touching a
/// boundary is excluded. Events missing begin or end are excluded, not
/// errors. Unfinished repeating events (no `until`, or `until` past the
/// window end) are expanded per frequency; DAILY rules and any rule with a
/// BYDAY or INTERVAL component are unsupported and excluded outright.
///
/// The result is sorted ascending by begin; the sort is stable, so ties
/// keep insertion order.
#[must_use]
pub fn included(
    calendar: &Calendar,
    window_start: DateTime<Tz>,
    window_end: DateTime<Tz>,
) -> Vec<Occurrence> {
    let mut occurrences: Vec<Occurrence> = calendar
        .events
        .iter()
        .filter_map(|event| match (event.begin, event.end) {
            (Some(begin), Some(end)) if begin > window_start && end < window_end => {
                Some(Occurrence::new(event, begin, Some(end)))
            }
            _ => None,
        })
        .collect();

    for event in &calendar.events {
        let Some(rule) = &event.rule else {
            continue;
        };
        if rule.until.is_some_and(|until| until <= window_end) {
            continue;
        }
        if let Some(occurrence) = expand(event, rule, window_start) {
            occurrences.push(occurrence);
        }
    }

    occurrences.sort_by_key(|occurrence| occurrence.begin);
    occurrences
}

/// Expands one unfinished repeating event against the window start.
fn expand(event: &Event, rule: &Rule, window_start: DateTime<Tz>) -> Option<Occurrence> {
    if rule.by_day.is_some() || rule.interval.is_some() {
        tracing::debug!(
            name = %event.name,
            "BYDAY/INTERVAL recurrence is unsupported, excluded from expansion"
        );
        return None;
    }

    match rule.frequency {
        Frequency::Daily => {
            tracing::debug!(
                name = %event.name,
                "DAILY recurrence is unsupported, excluded from expansion"
            );
            None
        }
        Frequency::Yearly => expand_yearly(event, window_start),
        Frequency::Weekly => expand_weekly(event, window_start),
    }
}

/// Yearly expansion: the candidate begin is the original begin with only
/// the year replaced by the window's year. The candidate is included iff it
/// falls strictly between the ORIGINAL begin and end (intentional). The
/// occurrence's end gets the same year substitution.
fn expand_yearly(event: &Event, window_start: DateTime<Tz>) -> Option<Occurrence> {
    let begin = event.begin?;
    let end = event.end?;

    let candidate = begin.with_year(window_start.year())?;
    if candidate <= begin || candidate >= end {
        return None;
    }

    let candidate_end = end.with_year(window_start.year());
    Some(Occurrence::new(event, candidate, candidate_end))
}

/// Weekly expansion: the occurrence lands on the window day matching the
/// original begin's weekday, with the original hour and minute. The end is
/// derived from `begin - end` (reversed by construction, intentionally),
/// and weekly occurrences are always included, with no window check.
fn expand_weekly(event: &Event, window_start: DateTime<Tz>) -> Option<Occurrence> {
    let begin = event.begin?;
    let end = event.end?;

    let offset = u64::from(begin.weekday().num_days_from_monday());
    let candidate = window_start
        .checked_add_days(Days::new(offset))?
        .with_hour(begin.hour())?
        .with_minute(begin.minute())?;

    let duration = begin.signed_duration_since(end);
    let candidate_end = candidate.checked_add_signed(duration);

    Some(Occurrence::new(event, candidate, candidate_end))
}

/// Resolves the occurrences of the current week.
///
/// The window is the Monday-aligned week containing "now" in the parsed
/// calendar's default timezone.
///
/// ## Errors
///
/// Fails with [`IcalError::NotParsed`] when `parsed` is `None`, i.e. no
/// parse was ever performed, and propagates window computation failures.
pub fn current_week(parsed: Option<&Calendar>) -> IcalResult<Vec<Occurrence>> {
    let calendar = parsed.ok_or(IcalError::NotParsed)?;
    let now = Utc::now().with_timezone(&calendar.timezone);
    let (start, end) = week_window(now)?;
    Ok(included(calendar, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::parse::parser::parse;
    use chrono::{TimeDelta, TimeZone, Weekday};

    const TOKYO: Tz = chrono_tz::Asia::Tokyo;

    fn tokyo(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        TOKYO.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    /// Week of Monday 2025-03-10 in Tokyo.
    fn march_window() -> (DateTime<Tz>, DateTime<Tz>) {
        (tokyo(2025, 3, 10, 0, 0), tokyo(2025, 3, 17, 0, 0))
    }

    fn plain_event(name: &str, begin: DateTime<Tz>, end: DateTime<Tz>) -> Event {
        Event {
            begin: Some(begin),
            end: Some(end),
            name: name.to_string(),
            ..Event::default()
        }
    }

    fn calendar_of(events: Vec<Event>) -> Calendar {
        Calendar {
            events,
            timezone: TOKYO,
        }
    }

    #[test]
    fn direct_event_strictly_inside_is_included() {
        let (start, end) = march_window();
        let calendar = calendar_of(vec![plain_event(
            "Inside",
            tokyo(2025, 3, 11, 9, 0),
            tokyo(2025, 3, 11, 10, 0),
        )]);

        let occurrences = included(&calendar, start, end);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].name, "Inside");
        assert!(!occurrences[0].repeating);
    }

    #[test]
    fn begin_equal_to_window_start_is_excluded() {
        // Intentional: the boundary comparison is strict on both ends.
        let (start, end) = march_window();
        let calendar = calendar_of(vec![plain_event(
            "On the boundary",
            start,
            tokyo(2025, 3, 10, 1, 0),
        )]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn end_equal_to_window_end_is_excluded() {
        let (start, end) = march_window();
        let calendar = calendar_of(vec![plain_event(
            "Touches the far edge",
            tokyo(2025, 3, 16, 23, 0),
            end,
        )]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn event_outside_the_window_is_excluded() {
        let (start, end) = march_window();
        let calendar = calendar_of(vec![plain_event(
            "Next month",
            tokyo(2025, 4, 2, 9, 0),
            tokyo(2025, 4, 2, 10, 0),
        )]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn event_missing_dates_is_excluded_not_fatal() {
        let (start, end) = march_window();
        let dateless = Event {
            name: "No dates".to_string(),
            ..Event::default()
        };
        let calendar = calendar_of(vec![
            dateless,
            plain_event("Has dates", tokyo(2025, 3, 11, 9, 0), tokyo(2025, 3, 11, 10, 0)),
        ]);

        let occurrences = included(&calendar, start, end);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].name, "Has dates");
    }

    #[test]
    fn weekly_expansion_keeps_time_of_day_and_weekday_offset() {
        // 2019-03-13 was a Wednesday.
        let (start, end) = march_window();
        let mut event = plain_event(
            "Weekly sync",
            tokyo(2019, 3, 13, 15, 30),
            tokyo(2019, 3, 13, 16, 30),
        );
        event.rule = Some(Rule {
            frequency: Frequency::Weekly,
            until: None,
            interval: None,
            by_day: None,
        });
        let calendar = calendar_of(vec![event.clone()]);

        let occurrences = included(&calendar, start, end);
        assert_eq!(occurrences.len(), 1);

        let occurrence = &occurrences[0];
        assert!(occurrence.repeating);
        assert_eq!(occurrence.begin.weekday(), Weekday::Wed);
        assert_eq!(occurrence.begin, tokyo(2025, 3, 12, 15, 30));
        // Intentional: duration is begin - end, so the derived end precedes the
        // begin by one hour.
        assert_eq!(occurrence.end, Some(tokyo(2025, 3, 12, 14, 30)));

        // The stored event is untouched.
        assert_eq!(calendar.events[0], event);
    }

    #[test]
    fn yearly_candidate_inside_original_bounds_is_included() {
        // A multi-year span: the 2025 candidate lands strictly between the
        // original begin and end.
        let (start, end) = march_window();
        let mut event = plain_event(
            "Long retrospective",
            tokyo(2019, 3, 10, 9, 0),
            tokyo(2026, 3, 10, 10, 0),
        );
        event.rule = Some(Rule {
            frequency: Frequency::Yearly,
            until: None,
            interval: None,
            by_day: None,
        });
        let calendar = calendar_of(vec![event]);

        let occurrences = included(&calendar, start, end);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].begin, tokyo(2025, 3, 10, 9, 0));
    }

    #[test]
    fn yearly_candidate_outside_original_bounds_is_excluded() {
        // Known quirk: a one-hour yearly event from 2019 recomputes its
        // candidate into 2025, which cannot fall inside the original
        // one-hour span, so it is excluded even though the candidate sits
        // squarely inside the queried window.
        let (start, end) = march_window();
        let mut event = plain_event(
            "Anniversary",
            tokyo(2019, 3, 10, 9, 0),
            tokyo(2019, 3, 10, 10, 0),
        );
        event.rule = Some(Rule {
            frequency: Frequency::Yearly,
            until: None,
            interval: None,
            by_day: None,
        });
        let calendar = calendar_of(vec![event]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn daily_rules_are_unsupported_and_excluded() {
        let (start, end) = march_window();
        let mut event = plain_event(
            "Every day",
            tokyo(2025, 3, 1, 8, 0),
            tokyo(2025, 3, 1, 9, 0),
        );
        event.rule = Some(Rule {
            frequency: Frequency::Daily,
            until: None,
            interval: None,
            by_day: None,
        });
        let calendar = calendar_of(vec![event]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn byday_and_interval_rules_are_unsupported_and_excluded() {
        let (start, end) = march_window();
        let mut with_by_day = plain_event(
            "Weekly on Monday",
            tokyo(2019, 3, 11, 9, 0),
            tokyo(2019, 3, 11, 10, 0),
        );
        with_by_day.rule = Some(Rule {
            frequency: Frequency::Weekly,
            until: None,
            interval: None,
            by_day: Some(crate::ical::core::rule::Weekday::Monday),
        });
        let mut with_interval = plain_event(
            "Biweekly",
            tokyo(2019, 3, 11, 9, 0),
            tokyo(2019, 3, 11, 10, 0),
        );
        with_interval.rule = Some(Rule {
            frequency: Frequency::Weekly,
            until: None,
            interval: Some(2),
            by_day: None,
        });
        let calendar = calendar_of(vec![with_by_day, with_interval]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn finished_rule_is_not_expanded() {
        let (start, end) = march_window();
        let mut event = plain_event(
            "Ended long ago",
            tokyo(2019, 3, 13, 15, 30),
            tokyo(2019, 3, 13, 16, 30),
        );
        event.rule = Some(Rule {
            frequency: Frequency::Weekly,
            until: Some(tokyo(2020, 1, 1, 0, 0)),
            interval: None,
            by_day: None,
        });
        let calendar = calendar_of(vec![event]);

        assert!(included(&calendar, start, end).is_empty());
    }

    #[test]
    fn rule_with_until_past_the_window_is_expanded() {
        let (start, end) = march_window();
        let mut event = plain_event(
            "Still running",
            tokyo(2019, 3, 13, 15, 30),
            tokyo(2019, 3, 13, 16, 30),
        );
        event.rule = Some(Rule {
            frequency: Frequency::Weekly,
            until: Some(tokyo(2030, 1, 1, 0, 0)),
            interval: None,
            by_day: None,
        });
        let calendar = calendar_of(vec![event]);

        assert_eq!(included(&calendar, start, end).len(), 1);
    }

    #[test]
    fn occurrences_are_sorted_ascending_by_begin() {
        let (start, end) = march_window();
        let calendar = calendar_of(vec![
            plain_event("Later", tokyo(2025, 3, 14, 9, 0), tokyo(2025, 3, 14, 10, 0)),
            plain_event("Earlier", tokyo(2025, 3, 11, 9, 0), tokyo(2025, 3, 11, 10, 0)),
        ]);

        let occurrences = included(&calendar, start, end);
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].name, "Earlier");
        assert_eq!(occurrences[1].name, "Later");
        assert!(occurrences[0].begin < occurrences[1].begin);
    }

    #[test]
    fn current_week_before_any_parse_fails() {
        let result = current_week(None);
        assert!(matches!(result, Err(IcalError::NotParsed)));
    }

    #[test]
    fn current_week_of_empty_calendar_is_empty_not_an_error() {
        let calendar = parse("BEGIN:VCALENDAR\nEND:VCALENDAR\n");
        let occurrences = current_week(Some(&calendar)).unwrap();
        assert!(occurrences.is_empty());
    }

    #[test]
    fn weekly_candidate_duration_matches_reversed_arithmetic() {
        let begin = tokyo(2019, 3, 13, 15, 30);
        let end = tokyo(2019, 3, 13, 16, 30);
        assert_eq!(begin.signed_duration_since(end), TimeDelta::minutes(-60));
    }
}
