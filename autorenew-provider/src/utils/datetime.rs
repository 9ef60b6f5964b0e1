//! Registrar date helpers
//!
//! The registrar reports `Created` / `Expires` as US-style `MM/DD/YYYY`
//! strings. Empty values decode to `None`; anything else that does not parse
//! is a decode error for the whole page.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Registrar date format
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a `MM/DD/YYYY` date, treating blank input as absent.
pub fn parse_us_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, US_DATE_FORMAT).map(Some)
}

/// Serde adapter for `Option<NaiveDate>` fields sent as `MM/DD/YYYY`.
pub fn deserialize_us_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_us_date(&s)
            .map_err(|e| Error::custom(format!("Invalid registrar date '{s}': {e}"))),
        None => Ok(None),
    }
}
