//! Timestamp value object.

use crate::errors::{LettrError, LettrResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An instant parsed from one of the API's timestamp formats.
///
/// Parsing tries RFC 3339 first (with or without sub-second precision),
/// then the legacy `YYYY-MM-DD HH:MM:SS` form, which is assumed UTC.
/// Equality and ordering compare instants, so the same moment in two
/// offsets compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Parses a timestamp string, trying each supported format in order.
    pub fn parse(value: impl AsRef<str>) -> LettrResult<Self> {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(LettrError::invalid_value("Timestamp cannot be empty."));
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(parsed));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self(naive.and_utc().fixed_offset()));
        }

        Err(LettrError::invalid_value(format!(
            "Invalid timestamp format: {value}"
        )))
    }

    /// The current moment.
    pub fn now() -> Self {
        Self(Utc::now().fixed_offset())
    }

    /// The underlying instant.
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// The same instant expressed in UTC.
    pub fn to_utc(&self) -> Self {
        Self(self.0.with_timezone(&Utc).fixed_offset())
    }

    /// RFC 3339 rendering.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Whether this instant precedes `other`.
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Whether this instant follows `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.fixed_offset())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_and_without_subseconds() {
        let plain = Timestamp::parse("2026-02-28T12:00:00+00:00").unwrap();
        let micros = Timestamp::parse("2026-02-28T12:00:00.123456+00:00").unwrap();
        assert!(plain.is_before(&micros));
    }

    #[test]
    fn parses_legacy_space_separated_form_as_utc() {
        let legacy = Timestamp::parse("2026-02-28 12:00:00").unwrap();
        let rfc = Timestamp::parse("2026-02-28T12:00:00Z").unwrap();
        assert_eq!(legacy, rfc);
    }

    #[test]
    fn equality_ignores_offset() {
        let utc = Timestamp::parse("2026-02-28T12:00:00Z").unwrap();
        let cet = Timestamp::parse("2026-02-28T13:00:00+01:00").unwrap();
        assert_eq!(utc, cet);
        assert_eq!(cet.to_utc().to_rfc3339(), "2026-02-28T12:00:00+00:00");
    }

    #[test]
    fn ordering_helpers() {
        let earlier = Timestamp::parse("2026-02-28T12:00:00Z").unwrap();
        let later = Timestamp::parse("2026-02-28T12:00:01Z").unwrap();
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(!earlier.is_after(&later));
    }

    #[test]
    fn rejects_unparseable_values() {
        assert!(Timestamp::parse("").is_err());
        assert!(Timestamp::parse("28/02/2026").is_err());
        assert!(Timestamp::parse("not a date").is_err());
    }
}
