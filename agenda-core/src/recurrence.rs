//! Recurrence descriptor: the parsed form of a recurrence rule.
//!
//! Deliberately small: DAILY/WEEKLY/MONTHLY with an interval, an optional
//! weekday or month-day set, and an inclusive `until` bound. This is not
//! an RFC 5545 RRULE implementation.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::time::parse_instant;

/// Recurrence frequency. Anything we don't recognize lands in the
/// explicit `Unrecognized` arm so that forward-compatible data degrades
/// to a single occurrence instead of erroring or disappearing. The raw
/// tag is kept verbatim: a stored rule must survive read-modify-write
/// cycles even when this version doesn't understand it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Unrecognized(String),
}

impl From<String> for Frequency {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "DAILY" => Frequency::Daily,
            "WEEKLY" => Frequency::Weekly,
            "MONTHLY" => Frequency::Monthly,
            _ => Frequency::Unrecognized(raw),
        }
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        match freq {
            Frequency::Daily => "DAILY".to_string(),
            Frequency::Weekly => "WEEKLY".to_string(),
            Frequency::Monthly => "MONTHLY".to_string(),
            Frequency::Unrecognized(raw) => raw,
        }
    }
}

/// A recurrence rule, embedded in an [`Event`](crate::event::Event).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recurrence {
    pub freq: Frequency,
    /// "Every N units"; values below 1 behave as 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekday indices, Monday = 0 (WEEKLY only). Empty means the
    /// anchor's weekday.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub byweekday: Vec<u8>,
    /// Days of month, 1-31 (MONTHLY only). Empty means the anchor's
    /// day of month.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bymonthday: Vec<u8>,
    /// Inclusive upper bound on occurrence start, as an ISO instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    /// Rule fields this version doesn't model, carried so a
    /// read-modify-write of the owning event never discards them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_interval() -> u32 {
    1
}

impl Recurrence {
    /// Step size guarded against zero.
    pub fn step(&self) -> i64 {
        i64::from(self.interval.max(1))
    }

    /// The `until` bound as a UTC instant. An unparsable value is ignored
    /// with a warning rather than hiding the whole series.
    pub fn until_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.until.as_deref()?;
        match parse_instant(raw) {
            Ok(dt) => Some(dt),
            Err(_) => {
                warn!(until = raw, "ignoring unparsable UNTIL bound");
                None
            }
        }
    }

    /// Weekday set for WEEKLY expansion, defaulting to the anchor's weekday.
    pub fn weekdays_or_anchor(&self, anchor: DateTime<Utc>) -> Vec<u8> {
        if self.byweekday.is_empty() {
            vec![anchor.weekday().num_days_from_monday() as u8]
        } else {
            self.byweekday.clone()
        }
    }

    /// Month-day set for MONTHLY expansion, defaulting to the anchor's
    /// day of month. Sorted so occurrences within a month come out in
    /// ascending order.
    pub fn monthdays_or_anchor(&self, anchor: DateTime<Utc>) -> Vec<u8> {
        let mut days = if self.bymonthday.is_empty() {
            vec![anchor.day() as u8]
        } else {
            self.bymonthday.clone()
        };
        days.sort_unstable();
        days.dedup();
        days
    }
}
