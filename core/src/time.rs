//! Time related utils.

use crate::{Error, Result};
use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{NaiveDateTime, Utc};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601 basic: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Time format for ISO 8601 extended with milliseconds: "2022-03-13T07:20:04.000Z"
const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

fn format(t: DateTime, fmt: &str) -> DelayedFormat<StrftimeItems<'_>> {
    t.format(fmt)
}

/// Format time into date: "20220313"
pub fn format_date(t: DateTime) -> String {
    format(t, DATE).to_string()
}

/// Format time into ISO 8601 basic: "20220313T072004Z"
pub fn format_iso8601(t: DateTime) -> String {
    format(t, ISO8601).to_string()
}

/// Format time into ISO 8601 extended with milliseconds: "2022-03-13T07:20:04.000Z"
///
/// This is the shape javascript's `Date.prototype.toISOString` produces.
pub fn format_iso8601_millis(t: DateTime) -> String {
    format(t, ISO8601_MILLIS).to_string()
}

/// Parse ISO 8601 basic time: "20220313T072004Z"
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    NaiveDateTime::parse_from_str(s, ISO8601)
        .map(|t| t.and_utc())
        .map_err(|e| {
            Error::config_invalid(format!("time {s:?} is not in YYYYMMDDTHHmmssZ format"))
                .with_source(e)
        })
}
