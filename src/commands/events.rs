//! Calendar range query over the store.

use std::path::Path;

use agenda_core::{WindowBounds, range_query};
use anyhow::Result;

use crate::store;

pub fn run(file: &Path, start: Option<&str>, end: Option<&str>) -> Result<()> {
    let events = store::load(file)?;
    let bounds = WindowBounds::from_args(start, end)?;

    let payloads = range_query(&events, bounds);
    println!("{}", serde_json::to_string_pretty(&payloads)?);
    Ok(())
}
