//! MIME type value object.

use crate::errors::{LettrError, LettrResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated, lowercased `type/subtype` MIME type for attachments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MimeType(String);

impl MimeType {
    /// `application/pdf`
    pub const APPLICATION_PDF: &'static str = "application/pdf";
    /// `application/json`
    pub const APPLICATION_JSON: &'static str = "application/json";
    /// `application/zip`
    pub const APPLICATION_ZIP: &'static str = "application/zip";
    /// `application/octet-stream`
    pub const APPLICATION_OCTET_STREAM: &'static str = "application/octet-stream";
    /// `image/png`
    pub const IMAGE_PNG: &'static str = "image/png";
    /// `image/jpeg`
    pub const IMAGE_JPEG: &'static str = "image/jpeg";
    /// `image/gif`
    pub const IMAGE_GIF: &'static str = "image/gif";
    /// `text/plain`
    pub const TEXT_PLAIN: &'static str = "text/plain";
    /// `text/html`
    pub const TEXT_HTML: &'static str = "text/html";
    /// `text/csv`
    pub const TEXT_CSV: &'static str = "text/csv";

    /// Validates and wraps a MIME type. The value is trimmed, lowercased,
    /// and must parse as `type/subtype`.
    pub fn new(value: impl Into<String>) -> LettrResult<Self> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(LettrError::invalid_value("MIME type cannot be empty."));
        }

        // the mime parser tolerates an empty subtype, so check the shape
        // separately
        let has_both_parts = value
            .split_once('/')
            .is_some_and(|(main, sub)| !main.is_empty() && !sub.is_empty());

        if !has_both_parts || value.parse::<mime::Mime>().is_err() {
            return Err(LettrError::invalid_value(format!(
                "Invalid MIME type format: {value}"
            )));
        }

        Ok(Self(value))
    }

    /// The normalized MIME type.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The main type, e.g. `image` from `image/png`.
    pub fn main_type(&self) -> &str {
        self.0.split('/').next().unwrap_or("")
    }

    /// The subtype, e.g. `png` from `image/png`.
    pub fn sub_type(&self) -> &str {
        self.0
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or("")
    }

    /// Whether the main type is `image`.
    pub fn is_image(&self) -> bool {
        self.main_type() == "image"
    }

    /// Whether the main type is `text`.
    pub fn is_text(&self) -> bool {
        self.main_type() == "text"
    }

    /// Whether the main type is `application`.
    pub fn is_application(&self) -> bool {
        self.main_type() == "application"
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for MimeType {
    type Error = LettrError;

    fn try_from(value: &str) -> LettrResult<Self> {
        Self::new(value)
    }
}

impl Serialize for MimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MimeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_and_splits() {
        let mime = MimeType::new("  Image/PNG ").unwrap();
        assert_eq!(mime.as_str(), "image/png");
        assert_eq!(mime.main_type(), "image");
        assert_eq!(mime.sub_type(), "png");
        assert!(mime.is_image());
        assert!(!mime.is_text());
    }

    #[test]
    fn accepts_parameters() {
        let mime = MimeType::new("text/plain; charset=utf-8").unwrap();
        assert!(mime.is_text());
    }

    #[test]
    fn rejects_missing_subtype() {
        assert!(MimeType::new("").is_err());
        assert!(MimeType::new("noslash").is_err());
        assert!(MimeType::new("bad/").is_err());
        assert!(MimeType::new("/png").is_err());
    }
}
