//! Window queries over a set of events.
//!
//! Two call patterns share the expander: the calendar range query
//! (explicit `[start, end)` bounds) and the alarm query (a near-future
//! window around an injected `now`, sorted and capped). Loading the
//! candidate events is the caller's concern.

use chrono::{DateTime, Duration, Utc};

use crate::error::{AgendaError, AgendaResult};
use crate::event::Event;
use crate::expand::expand;
use crate::payload::{AlarmPayload, OccurrencePayload};
use crate::time::parse_instant;

/// A half-open query window `[start, end)`.
#[derive(Debug, Clone, Copy)]
pub struct WindowBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WindowBounds {
    /// Parse window bounds from caller-supplied strings. Both bounds are
    /// required; a missing one is a caller error, never defaulted.
    pub fn from_args(start: Option<&str>, end: Option<&str>) -> AgendaResult<Self> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(AgendaError::MissingWindowBounds);
        };
        Ok(WindowBounds {
            start: parse_instant(start)?,
            end: parse_instant(end)?,
        })
    }
}

/// Options for the alarm query: look-ahead, look-back, and result cap.
#[derive(Debug, Clone, Copy)]
pub struct AlarmOptions {
    pub within_minutes: i64,
    pub grace_minutes: i64,
    pub limit: usize,
}

impl Default for AlarmOptions {
    fn default() -> Self {
        AlarmOptions {
            within_minutes: 24 * 60,
            grace_minutes: 5,
            limit: 50,
        }
    }
}

/// Calendar range query: every occurrence of every event intersecting the
/// window. Ordered by start within one event; no ordering guarantee
/// across events.
pub fn range_query(events: &[Event], bounds: WindowBounds) -> Vec<OccurrencePayload> {
    events
        .iter()
        .flat_map(|event| {
            expand(event, bounds.start, bounds.end)
                .iter()
                .map(|occ| OccurrencePayload::new(event, occ))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Alarm query: occurrences in `[now - grace, now + within)`, flattened
/// across events, sorted ascending by `when`, truncated to `limit`.
///
/// `now` is injected by the caller so the query stays deterministic.
pub fn alarm_query(events: &[Event], now: DateTime<Utc>, opts: AlarmOptions) -> Vec<AlarmPayload> {
    let win_start = now - Duration::minutes(opts.grace_minutes);
    let win_end = now + Duration::minutes(opts.within_minutes);

    let mut alarms: Vec<AlarmPayload> = events
        .iter()
        .flat_map(|event| {
            expand(event, win_start, win_end)
                .iter()
                .map(|occ| AlarmPayload::new(event, occ))
                .collect::<Vec<_>>()
        })
        .collect();

    // Canonical ISO strings are fixed-width UTC, so the lexicographic
    // order is chronological.
    alarms.sort_by(|a, b| a.when.cmp(&b.when));
    alarms.truncate(opts.limit);
    alarms
}
