//! Flat-file JSON store for events.
//!
//! The whole store is read, modified, and written back on every
//! mutation: last writer wins. Fine for a single-user tool; a real
//! deployment would put the events behind a document store.

use std::path::Path;

use agenda_core::Event;
use anyhow::{Context, Result};
use tracing::debug;

/// Load all events. A missing file reads as an empty store.
pub fn load(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        debug!(path = %path.display(), "event store missing, starting empty");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading event store {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&content)
        .with_context(|| format!("parsing event store {}", path.display()))?;
    debug!(path = %path.display(), count = events.len(), "loaded event store");
    Ok(events)
}

pub fn save(path: &Path, events: &[Event]) -> Result<()> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing event store {}", path.display()))?;
    Ok(())
}

/// Find an event by id, mutably.
pub fn find_mut<'a>(events: &'a mut [Event], id: &str) -> Result<&'a mut Event> {
    events
        .iter_mut()
        .find(|e| e.id == id)
        .with_context(|| format!("no event with id '{id}'"))
}

/// Split a possibly-composite occurrence id into (event id, occurrence ISO).
pub fn split_occurrence_id(id: &str) -> (&str, Option<&str>) {
    match id.split_once(':') {
        Some((series, occurrence)) => (series, Some(occurrence)),
        None => (id, None),
    }
}
