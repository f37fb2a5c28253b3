//! Domain name value object.

use crate::errors::{LettrError, LettrResult};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

const MAX_LENGTH: usize = 253;

/// Dotted labels of up to 63 characters each, ending in an alphabetic TLD.
static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$").unwrap()
});

pub(super) fn is_valid_domain(value: &str) -> bool {
    value.len() <= MAX_LENGTH && PATTERN.is_match(value)
}

/// A validated, lowercased sending domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(String);

impl DomainName {
    /// Validates and wraps a domain name. The value is trimmed and
    /// lowercased before the length and label checks.
    pub fn new(value: impl Into<String>) -> LettrResult<Self> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(LettrError::invalid_value("Domain name cannot be empty."));
        }

        if value.len() > MAX_LENGTH {
            return Err(LettrError::invalid_value(format!(
                "Domain name cannot exceed {MAX_LENGTH} characters."
            )));
        }

        if !PATTERN.is_match(&value) {
            return Err(LettrError::invalid_value(format!(
                "Invalid domain name: {value}"
            )));
        }

        Ok(Self(value))
    }

    /// The normalized domain name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = LettrError;

    fn try_from(value: &str) -> LettrResult<Self> {
        Self::new(value)
    }
}

impl Serialize for DomainName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DomainName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
