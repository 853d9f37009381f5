//! UTC instant parsing and formatting.
//!
//! All instants inside the engine are `DateTime<Utc>`. Stored timestamp
//! strings (`exdates`, `completed_on`, `until`) are parsed here and
//! re-rendered through [`canonical_iso`] so that string comparisons are
//! always between normalized forms.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{AgendaError, AgendaResult};

/// Formats accepted for timestamps without an explicit offset.
/// Naive instants are assumed to be UTC, never local time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 instant into a UTC datetime.
///
/// A trailing `Z` is treated as `+00:00`; instants carrying any other
/// offset are converted to UTC; naive instants (no offset at all) are
/// assumed UTC. Anything unparsable is an error, never a silent default.
pub fn parse_instant(s: &str) -> AgendaResult<DateTime<Utc>> {
    let trimmed = s.trim();
    let with_offset = trimmed.replace('Z', "+00:00");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_offset) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    // Bare dates are start-of-day UTC (window bounds often arrive this way)
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    Err(AgendaError::InvalidInstant(s.to_string()))
}

/// Render a UTC instant in the one canonical textual form used for
/// composite occurrence ids and exdate/completed_on matching:
/// `YYYY-MM-DDTHH:MM:SS+00:00`, second precision.
pub fn canonical_iso(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_accepts_trailing_z() {
        let dt = parse_instant("2025-01-01T09:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_converts_offset_to_utc() {
        let dt = parse_instant("2025-01-01T10:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_assumed_utc() {
        let dt = parse_instant("2025-01-01T09:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());

        // minute precision, as emitted by datetime-local form inputs
        let dt = parse_instant("2025-01-01T09:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_bare_date_is_start_of_day() {
        let dt = parse_instant("2025-03-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_instant("not-a-date"),
            Err(AgendaError::InvalidInstant(_))
        ));
        assert!(matches!(
            parse_instant(""),
            Err(AgendaError::InvalidInstant(_))
        ));
    }

    #[test]
    fn test_canonical_iso_form() {
        let dt = Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap();
        assert_eq!(canonical_iso(dt), "2025-04-10T09:00:00+00:00");
    }

    #[test]
    fn test_canonical_iso_normalizes_equivalent_spellings() {
        let a = parse_instant("2025-04-10T09:00:00Z").unwrap();
        let b = parse_instant("2025-04-10T11:00:00+02:00").unwrap();
        assert_eq!(canonical_iso(a), canonical_iso(b));
    }
}
