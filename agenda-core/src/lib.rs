//! Core types and algorithms for the agenda ecosystem.
//!
//! This crate provides everything the calendar feature needs below the
//! storage/HTTP layer:
//! - `Event` and `Recurrence` for describing (possibly recurring) events
//! - `expand` for turning an event into concrete occurrences in a window
//! - `query` for the two call patterns built on expansion: calendar range
//!   queries and upcoming-alarm queries

pub mod error;
pub mod event;
pub mod expand;
pub mod payload;
pub mod query;
pub mod recurrence;
pub mod time;

pub use error::{AgendaError, AgendaResult};
pub use event::Event;
pub use expand::{Occurrence, expand};
pub use payload::{AlarmPayload, ExtendedProps, OccurrencePayload};
pub use query::{AlarmOptions, WindowBounds, alarm_query, range_query};
pub use recurrence::{Frequency, Recurrence};
