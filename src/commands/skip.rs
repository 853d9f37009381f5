//! Skip one occurrence of a recurring series.
//!
//! Appends the canonical start ISO to the event's `exdates`; the series
//! definition itself is untouched. Idempotent.

use std::path::Path;

use agenda_core::time;
use anyhow::{Result, bail};

use crate::store;

pub fn run(file: &Path, occurrence_id: &str) -> Result<()> {
    let (series_id, occurrence) = store::split_occurrence_id(occurrence_id);
    let Some(raw) = occurrence else {
        bail!("expected a composite occurrence id '<event_id>:<occurrence_iso>'");
    };

    let mut events = store::load(file)?;
    let event = store::find_mut(&mut events, series_id)?;

    let iso = time::canonical_iso(time::parse_instant(raw)?);
    if event.exdates.contains(&iso) {
        println!("Occurrence {iso} already skipped");
    } else {
        event.exdates.push(iso.clone());
        println!("Skipped occurrence {iso}");
    }

    store::save(file, &events)
}
