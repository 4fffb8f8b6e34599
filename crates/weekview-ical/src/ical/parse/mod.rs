//! Tolerant ICS parsing: value resolution and the line state machine.

pub mod parser;
pub mod values;
