//! Core types for the roomcal gateway.
//!
//! This crate holds everything that is not HTTP plumbing:
//! - `calendar` for the owned calendar model and the location filter
//! - `ics` for reading and writing iCalendar text
//! - `schedule` for the title/presenter XML view
//! - `remote` for fetching the upstream feed

pub mod calendar;
pub mod error;
pub mod ics;
pub mod remote;
pub mod schedule;

pub use calendar::{Calendar, Component, Parameter, Property, RawComponent, filter_by_location};
pub use error::{RoomCalError, RoomCalResult};
