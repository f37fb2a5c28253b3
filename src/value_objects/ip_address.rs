//! IP address value object.

use crate::errors::{LettrError, LettrResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::IpAddr;

/// A validated IPv4 or IPv6 address, as reported on email events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpAddress(IpAddr);

impl IpAddress {
    /// Parses and wraps an IP address.
    pub fn new(value: impl AsRef<str>) -> LettrResult<Self> {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(LettrError::invalid_value("IP address cannot be empty."));
        }

        value
            .parse::<IpAddr>()
            .map(Self)
            .map_err(|_| LettrError::invalid_value(format!("Invalid IP address: {value}")))
    }

    /// The parsed address.
    pub fn value(&self) -> IpAddr {
        self.0
    }

    /// Whether this is an IPv4 address.
    pub fn is_ipv4(&self) -> bool {
        self.0.is_ipv4()
    }

    /// Whether this is an IPv6 address.
    pub fn is_ipv6(&self) -> bool {
        self.0.is_ipv6()
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for IpAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IpAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_families() {
        let v4 = IpAddress::new("203.0.113.7").unwrap();
        assert!(v4.is_ipv4());
        assert!(!v4.is_ipv6());

        let v6 = IpAddress::new("2001:db8::1").unwrap();
        assert!(v6.is_ipv6());
        assert_eq!(v6.to_string(), "2001:db8::1");
    }

    #[test]
    fn rejects_garbage() {
        assert!(IpAddress::new("").is_err());
        assert!(IpAddress::new("999.0.0.1").is_err());
        assert!(IpAddress::new("not-an-ip").is_err());
    }
}
