//! Calendar dates on the wire as `YYYY-MM-DD`.
//!
//! Use with `#[serde(with = "models::date")]` for `Date` fields and
//! `#[serde(with = "models::date::option", default)]` for `Option<Date>`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use time::Date;
use time::macros::format_description;

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns the underlying parse error for anything that is not a valid
/// calendar date in that shape.
pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}

/// Today's date in UTC.
#[must_use]
pub fn today() -> Date {
    time::OffsetDateTime::now_utc().date()
}

pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(D::Error::custom)
}

pub mod option {
    use super::*;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Empty strings decode as `None` so HTML-style forms can clear a date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_date(text).map(Some).map_err(D::Error::custom),
        }
    }
}
