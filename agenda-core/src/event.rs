//! Storage-neutral event types.
//!
//! `Event` is the persisted record the engine consumes. How rows are
//! fetched and written back is the owning storage layer's concern; the
//! engine only reads these fields and derives occurrences from them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::recurrence::Recurrence;

/// A calendar event (the master record of a series, or a one-off).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier, stable for the lifetime of the series.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub assignee: String,

    /// Anchor of the series (or the sole occurrence time for one-offs).
    pub start: DateTime<Utc>,
    /// Optional end; when present, `end >= start` (enforced upstream).
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,

    /// Series-level done flag (meaningful mainly for non-recurring events).
    #[serde(default)]
    pub completed: bool,
    /// ISO instants marking individual occurrences done. Duplicates are
    /// tolerated; entries are matched after UTC normalization.
    #[serde(default)]
    pub completed_on: Vec<String>,
    /// ISO instants of occurrence starts suppressed from the series.
    #[serde(default)]
    pub exdates: Vec<String>,

    /// Recurrence descriptor; absent means exactly one occurrence at `start`.
    #[serde(default)]
    pub rrule: Option<Recurrence>,
}

impl Event {
    /// Event duration (`end - start`), or `None` when `end` is absent.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    pub fn is_recurring(&self) -> bool {
        self.rrule.is_some()
    }
}
