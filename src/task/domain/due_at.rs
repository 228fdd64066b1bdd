//! Parsing of caller-supplied due timestamps.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a raw `due_at` value into a UTC instant.
///
/// Accepted forms, tried in order:
///
/// - RFC 3339 with an explicit offset (`2026-10-20T09:30:00+02:00`)
/// - an offset-less date-time, read as UTC (`2026-10-20T09:30:00.250`,
///   or `2026-10-20T09:30` as sent by `datetime-local` form inputs)
/// - a bare calendar date, read as UTC midnight (`2026-10-20`)
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidTimestamp`] carrying the raw input when
/// none of the forms match.
pub fn parse_due_at(raw: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let value = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        });

    naive
        .map(|date_time| date_time.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidTimestamp(raw.to_owned()))
}
