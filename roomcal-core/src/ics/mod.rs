//! ICS parsing and generation.
//!
//! Parsing goes through the icalendar crate's parser; generation is a plain
//! RFC 5545 writer over the owned model so that every property survives
//! byte-for-byte.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_calendar;
