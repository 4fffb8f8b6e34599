//! Core ICS types: token categories, events, recurrence rules.

pub mod event;
pub mod rule;
pub mod token;
