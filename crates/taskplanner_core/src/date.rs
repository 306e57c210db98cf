//! Calendar date parsing and formatting.
//!
//! # Responsibility
//! - Accept and emit the `DD-MM-YYYY` format used by the shell and the
//!   persisted document.
//! - Reject lexically malformed input and impossible calendar dates.
//!
//! # Invariants
//! - `parse_date(format_date(d)) == d` for every valid date `d`.
//! - `format_date(parse_date(s)) == s` for every trimmed valid string `s`.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("valid date regex"));

/// Date error for lexical and calendar validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input does not match the `DD-MM-YYYY` pattern.
    Malformed { input: String },
    /// Day or month does not exist in the given year.
    OutOfRange { day: u32, month: u32, year: i32 },
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { input } => {
                write!(f, "date `{input}` does not match DD-MM-YYYY")
            }
            Self::OutOfRange { day, month, year } => {
                write!(f, "no such calendar day: {day:02}-{month:02}-{year:04}")
            }
        }
    }
}

impl Error for DateError {}

/// Parses a `DD-MM-YYYY` string into a calendar date.
///
/// Surrounding whitespace is trimmed before matching; anything else beyond
/// the ten-character pattern is rejected. Day and month are checked against
/// the real calendar, leap years included.
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    let canonical = text.trim();
    let malformed = || DateError::Malformed {
        input: text.to_string(),
    };

    let captures = DATE_RE.captures(canonical).ok_or_else(malformed)?;
    // Captured groups are fixed-width digit runs; numeric parse cannot fail.
    let day: u32 = captures[1].parse().map_err(|_| malformed())?;
    let month: u32 = captures[2].parse().map_err(|_| malformed())?;
    let year: i32 = captures[3].parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::OutOfRange { day, month, year })
}

/// Formats a calendar date back to zero-padded `DD-MM-YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02}-{:02}-{:04}",
        date.day(),
        date.month(),
        date.year()
    )
}

/// Serde codec keeping `NaiveDate` fields on the `DD-MM-YYYY` wire format.
pub mod as_text {
    use super::{format_date, parse_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        format_date(*date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_date, parse_date, DateError};

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let date = parse_date("  25-12-2025 ").unwrap();
        assert_eq!(format_date(date), "25-12-2025");
    }

    #[test]
    fn parse_rejects_single_digit_fields() {
        let err = parse_date("1-1-2020").unwrap_err();
        assert!(matches!(err, DateError::Malformed { .. }));
    }

    #[test]
    fn parse_rejects_trailing_garbage() {
        let err = parse_date("01-01-2020x").unwrap_err();
        assert!(matches!(err, DateError::Malformed { .. }));
    }
}
