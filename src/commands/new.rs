//! Create a new event in the store.

use std::path::Path;

use agenda_core::{Event, Recurrence, time};
use anyhow::{Context, Result};
use uuid::Uuid;

use crate::store;

pub struct NewEvent {
    pub title: String,
    pub start: String,
    pub end: Option<String>,
    pub all_day: bool,
    pub location: Option<String>,
    pub assignee: Option<String>,
    pub description: Option<String>,
    pub rrule: Option<String>,
}

pub fn run(file: &Path, args: NewEvent) -> Result<()> {
    let mut events = store::load(file)?;

    let start = time::parse_instant(&args.start)?;
    let mut end = args.end.as_deref().map(time::parse_instant).transpose()?;
    // Keep the end >= start invariant the engine relies on: an inverted
    // end is dropped for all-day events and clamped to start otherwise.
    if let Some(e) = end {
        if e < start {
            end = if args.all_day { None } else { Some(start) };
        }
    }

    let rrule: Option<Recurrence> = args
        .rrule
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("invalid rrule JSON")?;

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: args.title,
        description: args.description.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        assignee: args.assignee.unwrap_or_default(),
        start,
        end,
        all_day: args.all_day,
        completed: false,
        completed_on: Vec::new(),
        exdates: Vec::new(),
        rrule,
    };
    let id = event.id.clone();
    events.push(event);
    store::save(file, &events)?;

    println!("Created event {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn args(start: &str, end: Option<&str>, all_day: bool) -> NewEvent {
        NewEvent {
            title: "Assessment".to_string(),
            start: start.to_string(),
            end: end.map(String::from),
            all_day,
            location: None,
            assignee: None,
            description: None,
            rrule: None,
        }
    }

    #[test]
    fn test_inverted_end_is_clamped_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        run(
            &path,
            args("2025-03-20T15:00", Some("2025-03-20T14:00"), false),
        )
        .unwrap();

        let events = store::load(&path).unwrap();
        assert_eq!(
            events[0].end,
            Some(Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap()),
            "an end before start must be clamped to start"
        );
    }

    #[test]
    fn test_inverted_end_is_dropped_for_all_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        run(
            &path,
            args("2025-03-20T15:00", Some("2025-03-19T15:00"), true),
        )
        .unwrap();

        let events = store::load(&path).unwrap();
        assert_eq!(events[0].end, None);
        assert!(events[0].all_day);
    }

    #[test]
    fn test_well_formed_end_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        run(
            &path,
            args("2025-03-20T15:00", Some("2025-03-20T16:00"), false),
        )
        .unwrap();

        let events = store::load(&path).unwrap();
        assert_eq!(
            events[0].end,
            Some(Utc.with_ymd_and_hms(2025, 3, 20, 16, 0, 0).unwrap())
        );
    }
}
