//! Upcoming-alarm feed over the store.

use std::path::Path;

use agenda_core::{AlarmOptions, alarm_query};
use anyhow::Result;
use chrono::Utc;

pub fn run(file: &Path, within: i64, grace: i64, limit: usize) -> Result<()> {
    let events = crate::store::load(file)?;
    let opts = AlarmOptions {
        within_minutes: within,
        grace_minutes: grace,
        limit,
    };

    let alarms = alarm_query(&events, Utc::now(), opts);
    println!("{}", serde_json::to_string_pretty(&alarms)?);
    Ok(())
}
