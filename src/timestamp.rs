//! ISO-8601 parsing and formatting at the record boundary.
//!
//! All values are local wall-clock times. When an input carries an offset the
//! written components are kept as-is and the offset is discarded.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::RecordError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses an ISO-8601 timestamp or bare `YYYY-MM-DD` date into a wall-clock instant.
pub fn parse_instant(raw: &str) -> Result<NaiveDateTime, RecordError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|_| RecordError::InvalidDate(raw.to_string()))
}

/// Calendar date of an ISO-8601 input.
pub fn parse_date(raw: &str) -> Result<NaiveDate, RecordError> {
    parse_instant(raw).map(|instant| instant.date())
}

pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}
