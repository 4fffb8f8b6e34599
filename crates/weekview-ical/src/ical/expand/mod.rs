//! Expansion of parsed calendars into concrete week occurrences.

pub mod occurrence;
