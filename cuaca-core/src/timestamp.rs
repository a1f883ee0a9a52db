//! Parsing of the date-time strings found in BMKG payloads.
//!
//! The feed mixes `2024-01-01T07:00:00`, `2024-01-01 07:00:00` and
//! `2024-01-01T00:00:00Z` in the same record, so parsing is attempted against
//! the ISO-8601 shapes first and a fixed pattern second.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

const FALLBACK_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A point in time as sent by upstream, with or without a UTC offset.
///
/// Offsets are kept as received; nothing is converted to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Parse `raw`, returning `None` for absent, empty or unreadable input.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.is_empty() {
            return None;
        }
        parse_iso(raw).or_else(|| parse_fallback(raw))
    }

    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Naive(dt) => *dt,
            Self::Zoned(dt) => dt.naive_local(),
        }
    }

    /// `YYYY-MM-DDTHH:MM:SS[.ffffff][+HH:MM]`
    pub fn to_iso_string(&self) -> String {
        let naive = self.naive_local();
        let mut out = if naive.nanosecond() == 0 {
            naive.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            naive.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        };
        if let Self::Zoned(dt) = self {
            out.push_str(&dt.format("%:z").to_string());
        }
        out
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

fn parse_iso(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::Zoned(dt));
    }

    // `%:z` does not read a literal `Z`.
    let with_offset = match raw.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => raw.to_string(),
    };
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Some(Timestamp::Zoned(dt));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Timestamp::Naive(dt));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Timestamp::Naive)
}

/// The whole input must match; leftover text is a failure.
fn parse_fallback(raw: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(raw, FALLBACK_PATTERN)
        .ok()
        .map(Timestamp::Naive)
}
