//! ICS grammar subset: core types, tolerant parsing, and week expansion.

pub mod core;
pub mod expand;
pub mod parse;
