//! Email address value object.

use crate::errors::{LettrError, LettrResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MAX_LENGTH: usize = 255;

/// A validated email address with an optional display name.
///
/// Equality is case-insensitive on the address part only; the display name
/// does not participate.
#[derive(Debug, Clone)]
pub struct EmailAddress {
    address: String,
    name: Option<String>,
}

impl EmailAddress {
    /// Validates and wraps an address. Whitespace is trimmed; the address
    /// must be non-empty, at most 255 characters, and of the form
    /// `local@domain` with a dotted domain.
    pub fn new(address: impl Into<String>) -> LettrResult<Self> {
        let address = address.into().trim().to_string();

        if address.is_empty() {
            return Err(LettrError::invalid_value("Email address cannot be empty."));
        }

        if address.len() > MAX_LENGTH {
            return Err(LettrError::invalid_value(format!(
                "Email address cannot exceed {MAX_LENGTH} characters."
            )));
        }

        if !is_valid_address(&address) {
            return Err(LettrError::invalid_value(format!(
                "Invalid email address: {address}"
            )));
        }

        Ok(Self {
            address,
            name: None,
        })
    }

    /// Validates an address and attaches a display name. A blank name is
    /// treated as absent.
    pub fn with_name(address: impl Into<String>, name: impl Into<String>) -> LettrResult<Self> {
        let mut email = Self::new(address)?;
        let name = name.into().trim().to_string();
        email.name = (!name.is_empty()).then_some(name);
        Ok(email)
    }

    /// The bare address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `Name <address>` when a name is present, the bare address otherwise.
    pub fn formatted(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} <{}>", self.address),
            None => self.address.clone(),
        }
    }
}

/// Deliberately modest: one `@`, a non-empty local part without whitespace,
/// and a domain that passes the same label rules as [`super::DomainName`].
/// The server performs full RFC validation; this catches the obvious
/// mistakes before a request is spent on them.
fn is_valid_address(address: &str) -> bool {
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if local
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '@')
    {
        return false;
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    super::domain_name::is_valid_domain(&domain.to_ascii_lowercase())
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl PartialEq for EmailAddress {
    fn eq(&self, other: &Self) -> bool {
        self.address.eq_ignore_ascii_case(&other.address)
    }
}

impl Eq for EmailAddress {}

impl TryFrom<&str> for EmailAddress {
    type Error = LettrError;

    fn try_from(value: &str) -> LettrResult<Self> {
        Self::new(value)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address)
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_address_round_trips() {
        let email = EmailAddress::new("  User@Example.com ").unwrap();
        assert_eq!(email.address(), "User@Example.com");
        assert_eq!(email.to_string(), "User@Example.com");
    }

    #[test]
    fn equality_is_case_insensitive_on_address_only() {
        let a = EmailAddress::new("user@example.com").unwrap();
        let b = EmailAddress::new("USER@EXAMPLE.COM").unwrap();
        let named = EmailAddress::with_name("user@example.com", "Someone").unwrap();

        assert_eq!(a, b);
        assert_eq!(a, named);
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "   ",
            "no-at-sign",
            "user@",
            "@example.com",
            "user name@example.com",
            "user@localhost",
            ".leading@example.com",
            "double..dot@example.com",
        ] {
            assert!(EmailAddress::new(bad).is_err(), "accepted: {bad:?}");
        }
    }

    #[test]
    fn rejects_overlong_address() {
        let local = "a".repeat(250);
        assert!(EmailAddress::new(format!("{local}@example.com")).is_err());
    }

    #[test]
    fn formatted_includes_name_when_present() {
        let named = EmailAddress::with_name("user@example.com", "Ada Lovelace").unwrap();
        assert_eq!(named.formatted(), "Ada Lovelace <user@example.com>");

        let plain = EmailAddress::new("user@example.com").unwrap();
        assert_eq!(plain.formatted(), "user@example.com");

        let blank_name = EmailAddress::with_name("user@example.com", "   ").unwrap();
        assert_eq!(blank_name.name(), None);
    }

    #[test]
    fn deserializes_with_validation() {
        let email: EmailAddress = serde_json::from_str("\"user@example.com\"").unwrap();
        assert_eq!(email.address(), "user@example.com");
        assert!(serde_json::from_str::<EmailAddress>("\"nope\"").is_err());
    }
}
