//! Parsing of program-date-time values.
//!
//! HLS carries wall-clock timestamps (`#EXT-X-PROGRAM-DATE-TIME`, `START-DATE`, etc.) in ISO-8601
//! / RFC 3339 notation with optional fractional seconds. The parsed representation is
//! [`chrono::DateTime<chrono::FixedOffset>`] so that the declared UTC offset survives and so that
//! timeline arithmetic (deriving each segment's wall-clock position from the last declared anchor)
//! is available through [`chrono::TimeDelta`].

use crate::error::ParseDateError;
use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Parses a string slice into a `DateTime<FixedOffset>`.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00.000Z`, `2025-08-10T17:27:42.213-05:00`) with any
/// fractional-second precision, and additionally tolerates a missing UTC offset
/// (`2024-01-01T00:00:00`), which some packagers emit; such values are taken as UTC.
///
/// ```
/// # use hls_manifest::date;
/// let with_offset = date::parse("2025-08-10T17:27:42.213-05:00").unwrap();
/// let zulu = date::parse("2025-08-10T22:27:42.213Z").unwrap();
/// assert_eq!(with_offset, zulu);
/// assert_eq!(zulu, date::parse("2025-08-10T22:27:42.213").unwrap());
/// ```
pub fn parse(input: &str) -> Result<DateTime<FixedOffset>, ParseDateError> {
    let input = input.trim_ascii();
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Ok(date);
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| ParseDateError)
}
