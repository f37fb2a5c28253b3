//! Base64 payload value object.

use crate::errors::{LettrError, LettrResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Base64-encoded attachment content, verified decodable at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Base64Data(String);

impl Base64Data {
    /// Validates and wraps already-encoded data. The alphabet and padding
    /// are checked by actually decoding the value.
    pub fn new(value: impl Into<String>) -> LettrResult<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(LettrError::invalid_value("Base64 data cannot be empty."));
        }

        if STANDARD.decode(&value).is_err() {
            return Err(LettrError::invalid_value("Invalid base64 encoded data."));
        }

        Ok(Self(value))
    }

    /// Encodes raw bytes.
    pub fn from_bytes(data: impl AsRef<[u8]>) -> Self {
        Self(STANDARD.encode(data))
    }

    /// The encoded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes back to raw bytes.
    pub fn decode(&self) -> Vec<u8> {
        // Cannot fail: the constructor already proved the value decodes.
        STANDARD.decode(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Base64Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Base64Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Base64Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_base64() {
        let data = Base64Data::new("aGVsbG8=").unwrap();
        assert_eq!(data.decode(), b"hello");
    }

    #[test]
    fn encodes_raw_bytes() {
        let data = Base64Data::from_bytes(b"hello");
        assert_eq!(data.as_str(), "aGVsbG8=");
    }

    #[test]
    fn rejects_bad_alphabet_and_padding() {
        assert!(Base64Data::new("").is_err());
        assert!(Base64Data::new("not base64!!").is_err());
        assert!(Base64Data::new("aGVsbG8").is_err()); // missing padding
    }
}
