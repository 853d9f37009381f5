//! Wire-shaped occurrence payloads.
//!
//! Concrete structs for what the calendar view and the alarm feed
//! consume, replacing ad-hoc dictionaries with a statically checkable
//! contract. Field names follow what the frontend expects (`allDay`,
//! `extendedProps`, `completedOn`).

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::expand::Occurrence;
use crate::time::canonical_iso;

/// One calendar-view entry: a concrete occurrence plus the display
/// fields of its owning event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrencePayload {
    pub id: String,
    pub start: String,
    pub end: Option<String>,
    pub title: String,
    #[serde(rename = "allDay")]
    pub all_day: bool,
    #[serde(rename = "occurrenceStart")]
    pub occurrence_start: String,
    #[serde(rename = "extendedProps")]
    pub extended_props: ExtendedProps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProps {
    pub description: String,
    pub location: String,
    pub assignee: String,
    pub completed: bool,
    #[serde(rename = "completedOn")]
    pub completed_on: Vec<String>,
    pub recurring: bool,
    pub occurrence: bool,
}

impl OccurrencePayload {
    pub fn new(event: &Event, occurrence: &Occurrence) -> Self {
        let start = canonical_iso(occurrence.start);
        OccurrencePayload {
            id: occurrence.id.clone(),
            occurrence_start: start.clone(),
            start,
            end: occurrence.end.map(canonical_iso),
            title: event.title.clone(),
            all_day: event.all_day,
            extended_props: ExtendedProps {
                description: event.description.clone(),
                location: event.location.clone(),
                assignee: event.assignee.clone(),
                completed: occurrence.completed,
                completed_on: event.completed_on.clone(),
                recurring: occurrence.recurring,
                occurrence: occurrence.occurrence,
            },
        }
    }
}

/// One upcoming-alarm entry. `when` duplicates the occurrence start so
/// consumers can sort and display without digging into nested fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmPayload {
    pub kind: String,
    pub event_id: String,
    pub when: String,
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    #[serde(rename = "occurrenceStart")]
    pub occurrence_start: String,
    pub assignee: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "allDay")]
    pub all_day: bool,
}

impl AlarmPayload {
    pub fn new(event: &Event, occurrence: &Occurrence) -> Self {
        let start = canonical_iso(occurrence.start);
        AlarmPayload {
            kind: "event".to_string(),
            event_id: occurrence.id.clone(),
            when: start.clone(),
            occurrence_start: start.clone(),
            start,
            end: occurrence.end.map(canonical_iso),
            title: event.title.clone(),
            assignee: event.assignee.clone(),
            location: event.location.clone(),
            description: event.description.clone(),
            all_day: event.all_day,
        }
    }
}
