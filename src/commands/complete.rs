//! Mark an occurrence (or a whole one-off event) completed.
//!
//! A composite id targets one occurrence: its canonical start ISO is
//! appended to (or removed from) the event's `completed_on` list. A plain
//! id toggles the series-level `completed` flag.

use std::path::Path;

use agenda_core::time;
use anyhow::Result;

use crate::store;

pub fn run(file: &Path, occurrence_id: &str, undo: bool) -> Result<()> {
    let mut events = store::load(file)?;
    let (series_id, occurrence) = store::split_occurrence_id(occurrence_id);
    let event = store::find_mut(&mut events, series_id)?;

    match occurrence {
        Some(raw) => {
            let iso = time::canonical_iso(time::parse_instant(raw)?);
            if undo {
                event.completed_on.retain(|s| s != &iso);
                println!("Unmarked occurrence {iso}");
            } else if event.completed_on.contains(&iso) {
                println!("Occurrence {iso} already completed");
            } else {
                event.completed_on.push(iso.clone());
                println!("Marked occurrence {iso} completed");
            }
        }
        None => {
            event.completed = !undo;
            println!(
                "Marked event {series_id} {}",
                if undo { "not completed" } else { "completed" }
            );
        }
    }

    store::save(file, &events)
}
