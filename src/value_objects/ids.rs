//! Opaque string identifiers.
//!
//! These share one rule: trimmed, non-empty, optionally length-bounded.
//! The macro keeps the six wrappers from drifting apart.

use crate::errors::{LettrError, LettrResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! string_value_object {
    ($(#[$doc:meta])* $name:ident, $label:literal $(, max_len = $max:expr)?) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps the raw value.
            pub fn new(value: impl Into<String>) -> LettrResult<Self> {
                let value = value.into().trim().to_string();

                if value.is_empty() {
                    return Err(LettrError::invalid_value(concat!(
                        $label,
                        " cannot be empty."
                    )));
                }

                $(
                    if value.len() > $max {
                        return Err(LettrError::invalid_value(format!(
                            concat!($label, " cannot exceed {} characters."),
                            $max
                        )));
                    }
                )?

                Ok(Self(value))
            }

            /// The wrapped value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = LettrError;

            fn try_from(value: &str) -> LettrResult<Self> {
                Self::new(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_value_object!(
    /// Pagination cursor for the event listing endpoints.
    Cursor,
    "Cursor"
);

string_value_object!(
    /// Identifier assigned to an accepted send request.
    RequestId,
    "Request ID"
);

string_value_object!(
    /// Identifier of an individual message within a send request.
    MessageId,
    "Message ID"
);

string_value_object!(
    /// Identifier of a configured webhook.
    WebhookId,
    "Webhook ID"
);

string_value_object!(
    /// Free-form label attached to a send for later filtering.
    Tag,
    "Tag",
    max_len = 64
);

string_value_object!(
    /// Campaign identifier attached to email events.
    CampaignId,
    "Campaign ID",
    max_len = 64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        let id = RequestId::new("  req-123  ").unwrap();
        assert_eq!(id.as_str(), "req-123");
        assert_eq!(id.to_string(), "req-123");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(Cursor::new("").is_err());
        assert!(MessageId::new("   ").is_err());
    }

    #[test]
    fn tag_rejects_overlong_value() {
        assert!(Tag::new("a".repeat(64)).is_ok());
        let err = Tag::new("a".repeat(65)).unwrap_err();
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn campaign_id_length_bound() {
        assert!(CampaignId::new("welcome-2026").is_ok());
        assert!(CampaignId::new("x".repeat(65)).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id: WebhookId = serde_json::from_str("\"wh_1\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"wh_1\"");
        assert!(serde_json::from_str::<WebhookId>("\"\"").is_err());
    }
}
