//! ISO 8601 date parsing shared by every date field.

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::ParseError;

use crate::InvalidWaczError;
use crate::Result;

/// Timestamp with sub-second precision and a normalized UTC offset.
pub type Timestamp = DateTime<FixedOffset>;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO 8601 date or date-time.
///
/// Accepts RFC 3339 (`Z` or numeric offset), a space in place of `T`,
/// date-times without an offset and bare dates. Values without an offset are
/// taken as UTC; a bare date is midnight UTC.
///
/// # Errors
///
/// Returns the RFC 3339 parse error when no accepted form matches.
///
/// # Examples
///
/// ```
/// use wacz_core::date::parse_iso8601;
///
/// let ts = parse_iso8601("2023-07-04T12:25:53.900Z")?;
/// assert_eq!(ts.timestamp_subsec_millis(), 900);
/// # Ok::<(), chrono::ParseError>(())
/// ```
pub fn parse_iso8601(text: &str) -> std::result::Result<Timestamp, ParseError> {
    let text = text.trim();

    let rfc3339_err = match DateTime::parse_from_rfc3339(text) {
        Ok(ts) => return Ok(ts),
        Err(e) => e,
    };

    let with_offset = text
        .strip_suffix(['Z', 'z'])
        .map_or_else(|| text.to_string(), |rest| format!("{rest}+00:00"));
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(&with_offset, format) {
            return Ok(ts);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc().fixed_offset());
    }

    Err(rfc3339_err)
}

/// Parses a named date field, mapping failure to `InvalidDateField`.
pub(crate) fn parse_date_field(text: &str, field: &'static str) -> Result<Timestamp> {
    parse_iso8601(text).map_err(|e| {
        tracing::debug!(field, value = text, error = %e, "rejected date field");
        InvalidWaczError::InvalidDateField { field }
    })
}
