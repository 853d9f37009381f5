//! Occurrence expansion for (recurring) events.
//!
//! Expands an event into the concrete occurrences that intersect a query
//! window `[win_start, win_end)`, applying skip-exceptions and completion
//! marks as it goes. Occurrences are recomputed on every call and never
//! persisted; `exdates` and `completed_on` on the event stay the sole
//! source of truth.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::event::Event;
use crate::recurrence::{Frequency, Recurrence};
use crate::time::{canonical_iso, parse_instant};

/// One concrete scheduled instance derived from an event.
///
/// `id` is the externally visible handle: `"<event_id>:<start_iso>"` for
/// instances of a recurring series, the plain event id for a one-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub id: String,
    pub event_id: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Whether the owning event carries a recurrence rule.
    pub recurring: bool,
    /// True only for instances generated from a recurring series.
    pub occurrence: bool,
}

/// Normalized views of `exdates` and `completed_on`, built once per
/// expansion. Stored strings that fail to parse can never match and are
/// skipped.
struct Tracker {
    exdates: HashSet<String>,
    completed_on: HashSet<String>,
}

impl Tracker {
    fn new(event: &Event) -> Self {
        Tracker {
            exdates: normalize(&event.exdates, event, "exdates"),
            completed_on: normalize(&event.completed_on, event, "completed_on"),
        }
    }

    fn is_excluded(&self, iso: &str) -> bool {
        self.exdates.contains(iso)
    }

    /// Exact canonical match, or any completion mark on the same calendar
    /// date. The same-day fallback tolerates clock skew between the write
    /// path that recorded the mark and the occurrence start it refers to.
    fn is_completed(&self, iso: &str) -> bool {
        if self.completed_on.contains(iso) {
            return true;
        }
        let day = &iso[..10];
        self.completed_on.iter().any(|s| &s[..10] == day)
    }
}

fn normalize(raw: &[String], event: &Event, field: &str) -> HashSet<String> {
    raw.iter()
        .filter_map(|s| match parse_instant(s) {
            Ok(dt) => Some(canonical_iso(dt)),
            Err(_) => {
                debug!(event_id = %event.id, field, value = %s, "skipping unparsable timestamp");
                None
            }
        })
        .collect()
}

/// Expand `event` into the occurrences intersecting `[win_start, win_end)`,
/// in ascending start order.
///
/// Shared policy for every branch: nothing before the anchor is emitted,
/// `until` is an inclusive bound on occurrence start, and an occurrence
/// must intersect the window (overlap for events with a duration, start
/// containment for zero-duration events).
pub fn expand(event: &Event, win_start: DateTime<Utc>, win_end: DateTime<Utc>) -> Vec<Occurrence> {
    let tracker = Tracker::new(event);
    // A zero-length duration behaves like no duration at all (point event)
    let dur = event.duration().filter(|d| !d.is_zero());
    let mut out = Vec::new();

    let Some(rule) = &event.rrule else {
        emit_single(event, &tracker, dur, win_start, win_end, &mut out);
        return out;
    };

    match &rule.freq {
        Frequency::Daily => {
            expand_daily(event, rule, &tracker, dur, win_start, win_end, &mut out);
        }
        Frequency::Weekly => {
            expand_weekly(event, rule, &tracker, dur, win_start, win_end, &mut out);
        }
        Frequency::Monthly => {
            expand_monthly(event, rule, &tracker, dur, win_start, win_end, &mut out);
        }
        Frequency::Unrecognized(raw) => {
            warn!(
                event_id = %event.id,
                freq = %raw,
                "unrecognized recurrence frequency, treating event as a single occurrence"
            );
            emit_single(event, &tracker, dur, win_start, win_end, &mut out);
        }
    }

    out
}

fn intersects(
    start: DateTime<Utc>,
    dur: Option<Duration>,
    win_start: DateTime<Utc>,
    win_end: DateTime<Utc>,
) -> bool {
    match dur {
        Some(d) => start < win_end && start + d > win_start,
        None => win_start <= start && start < win_end,
    }
}

/// The non-recurring path: exactly one candidate occurrence at the anchor.
/// Also the fallback for unrecognized frequencies.
fn emit_single(
    event: &Event,
    tracker: &Tracker,
    dur: Option<Duration>,
    win_start: DateTime<Utc>,
    win_end: DateTime<Utc>,
    out: &mut Vec<Occurrence>,
) {
    let start = event.start;
    if !intersects(start, dur, win_start, win_end) {
        return;
    }
    let iso = canonical_iso(start);
    out.push(Occurrence {
        id: event.id.clone(),
        event_id: event.id.clone(),
        start,
        end: dur.map(|d| start + d),
        // The series-level flag only reaches the single occurrence of a
        // non-recurring event, never individual recurring instances.
        completed: event.completed || tracker.is_completed(&iso),
        recurring: event.is_recurring(),
        occurrence: false,
    });
}

fn emit_recurring(
    event: &Event,
    tracker: &Tracker,
    dur: Option<Duration>,
    start: DateTime<Utc>,
    out: &mut Vec<Occurrence>,
) {
    let iso = canonical_iso(start);
    if tracker.is_excluded(&iso) {
        return;
    }
    out.push(Occurrence {
        id: format!("{}:{}", event.id, iso),
        event_id: event.id.clone(),
        start,
        end: dur.map(|d| start + d),
        completed: tracker.is_completed(&iso),
        recurring: true,
        occurrence: true,
    });
}

/// DAILY: jump the cursor straight to the first on-grid day at or after
/// the window, then step by `interval` days. The grid is anchored at the
/// event start, not the window start.
fn expand_daily(
    event: &Event,
    rule: &Recurrence,
    tracker: &Tracker,
    dur: Option<Duration>,
    win_start: DateTime<Utc>,
    win_end: DateTime<Utc>,
    out: &mut Vec<Occurrence>,
) {
    let step = rule.step();
    let until = rule.until_utc();

    let mut offset_days = (win_start.date_naive() - event.start.date_naive())
        .num_days()
        .max(0);
    if offset_days % step != 0 {
        offset_days += step - offset_days % step;
    }

    let mut cursor = event.start + Duration::days(offset_days);
    while cursor < win_end {
        if let Some(u) = until
            && cursor > u
        {
            break;
        }
        if intersects(cursor, dur, win_start, win_end) {
            emit_recurring(event, tracker, dur, cursor, out);
        }
        cursor += Duration::days(step);
    }
}

/// WEEKLY: walk every calendar day of the window; a day qualifies when it
/// falls in an on-interval week (counted in whole weeks since the anchor)
/// and its weekday is in the requested set. Candidates use the anchor's
/// time of day.
fn expand_weekly(
    event: &Event,
    rule: &Recurrence,
    tracker: &Tracker,
    dur: Option<Duration>,
    win_start: DateTime<Utc>,
    win_end: DateTime<Utc>,
    out: &mut Vec<Occurrence>,
) {
    let step = rule.step();
    let until = rule.until_utc();
    let weekdays = rule.weekdays_or_anchor(event.start);
    let anchor_date = event.start.date_naive();
    let time_of_day = event.start.time();

    let mut day = win_start.date_naive();
    let last_day = (win_end + Duration::days(1)).date_naive();
    while day < last_day {
        // Floor division so days before the anchor land in negative weeks
        let weeks_since_anchor = (day - anchor_date).num_days().div_euclid(7);
        let on_grid = weeks_since_anchor >= 0 && weeks_since_anchor % step == 0;
        if on_grid && weekdays.contains(&(day.weekday().num_days_from_monday() as u8)) {
            let cursor = day.and_time(time_of_day).and_utc();
            if until.is_none_or(|u| cursor <= u) && intersects(cursor, dur, win_start, win_end) {
                emit_recurring(event, tracker, dur, cursor, out);
            }
        }
        day += Duration::days(1);
    }
}

/// MONTHLY: visit every `interval`-th month counted from the anchor's
/// month, starting at the later of the window's month and the anchor's
/// month. Requested days that don't exist in a visited month (day 31 in
/// February) are skipped, not shifted.
fn expand_monthly(
    event: &Event,
    rule: &Recurrence,
    tracker: &Tracker,
    dur: Option<Duration>,
    win_start: DateTime<Utc>,
    win_end: DateTime<Utc>,
    out: &mut Vec<Occurrence>,
) {
    let step = rule.step() as i32;
    let until = rule.until_utc();
    let monthdays = rule.monthdays_or_anchor(event.start);
    let time_of_day = event.start.time();

    let (anchor_year, anchor_month) = (event.start.year(), event.start.month() as i32);
    let (mut year, mut month) = (win_start.year(), win_start.month() as i32);
    if (year, month) < (anchor_year, anchor_month) {
        year = anchor_year;
        month = anchor_month;
    }

    // Align to the anchor's interval grid: month-offset from the anchor
    // must be a multiple of the interval.
    let offset = (year - anchor_year) * 12 + (month - anchor_month);
    let behind = offset.rem_euclid(step);
    if behind != 0 {
        (year, month) = add_months(year, month, step - behind);
    }

    loop {
        let month_first = NaiveDate::from_ymd_opt(year, month as u32, 1)
            .unwrap()
            .and_time(time_of_day)
            .and_utc();
        if month_first >= win_end {
            break;
        }

        let last_dom = days_in_month(year, month as u32);
        for &dom in &monthdays {
            if dom < 1 || u32::from(dom) > last_dom {
                continue;
            }
            let cursor = NaiveDate::from_ymd_opt(year, month as u32, u32::from(dom))
                .unwrap()
                .and_time(time_of_day)
                .and_utc();
            if cursor < event.start {
                continue;
            }
            if let Some(u) = until
                && cursor > u
            {
                continue;
            }
            if intersects(cursor, dur, win_start, win_end) {
                emit_recurring(event, tracker, dur, cursor, out);
            }
        }

        (year, month) = add_months(year, month, step);
    }
}

fn add_months(year: i32, month: i32, months: i32) -> (i32, i32) {
    let total = month - 1 + months;
    (year + total.div_euclid(12), total.rem_euclid(12) + 1)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let (next_year, next_month) = add_months(year, month as i32, 1);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month as u32, 1).unwrap();
    (next_first - first).num_days() as u32
}
