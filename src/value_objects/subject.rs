//! Subject line value object.

use crate::errors::{LettrError, LettrResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// RFC 2822 recommends lines of no more than 998 characters.
const MAX_LENGTH: usize = 998;

/// A validated email subject line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    /// Validates and wraps a subject: trimmed, non-empty, at most 998
    /// characters.
    pub fn new(value: impl Into<String>) -> LettrResult<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(LettrError::invalid_value("Subject cannot be empty."));
        }

        if value.len() > MAX_LENGTH {
            return Err(LettrError::invalid_value(format!(
                "Subject cannot exceed {MAX_LENGTH} characters."
            )));
        }

        Ok(Self(value))
    }

    /// The subject text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Subject {
    type Error = LettrError;

    fn try_from(value: &str) -> LettrResult<Self> {
        Self::new(value)
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(Subject::new("  Welcome!  ").unwrap().as_str(), "Welcome!");
    }

    #[test]
    fn rejects_empty() {
        assert!(Subject::new("").is_err());
        assert!(Subject::new("   ").is_err());
    }

    #[test]
    fn enforces_rfc_2822_line_limit() {
        assert!(Subject::new("s".repeat(998)).is_ok());
        assert!(Subject::new("s".repeat(999)).is_err());
    }
}
