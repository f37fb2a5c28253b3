//! Collection of email addresses.

use crate::errors::{LettrError, LettrResult};
use crate::value_objects::EmailAddress;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The API rejects sends with more than 50 recipients.
const MAX_RECIPIENTS: usize = 50;

/// An ordered collection of validated email addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailAddressCollection(Vec<EmailAddress>);

impl EmailAddressCollection {
    /// Wraps already-validated addresses.
    pub fn from_vec(items: Vec<EmailAddress>) -> Self {
        Self(items)
    }

    /// Validates each raw address in order.
    pub fn from_raw<I, S>(items: I) -> LettrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        items
            .into_iter()
            .map(EmailAddress::new)
            .collect::<LettrResult<Vec<_>>>()
            .map(Self)
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates a recipient list: 1 to 50 entries.
    pub fn for_recipients<I, S>(items: I) -> LettrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let collection = Self::from_raw(items)?;

        if collection.is_empty() {
            return Err(LettrError::invalid_value(
                "At least one recipient is required.",
            ));
        }

        if collection.len() > MAX_RECIPIENTS {
            return Err(LettrError::invalid_value(format!(
                "Maximum {MAX_RECIPIENTS} recipients allowed, {} provided.",
                collection.len()
            )));
        }

        Ok(collection)
    }

    /// Returns a new collection with the address appended.
    pub fn add(&self, address: EmailAddress) -> Self {
        let mut items = self.0.clone();
        items.push(address);
        Self(items)
    }

    /// The first address, if any.
    pub fn first(&self) -> Option<&EmailAddress> {
        self.0.first()
    }

    /// Case-insensitive membership check on the address part.
    pub fn contains(&self, address: &EmailAddress) -> bool {
        self.0.iter().any(|item| item == address)
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the addresses in order.
    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.iter()
    }

    /// The bare address strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|a| a.address().to_string()).collect()
    }

    /// The formatted `Name <address>` strings, in order.
    pub fn to_formatted_strings(&self) -> Vec<String> {
        self.0.iter().map(EmailAddress::formatted).collect()
    }
}

impl IntoIterator for EmailAddressCollection {
    type Item = EmailAddress;
    type IntoIter = std::vec::IntoIter<EmailAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for EmailAddressCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmailAddressCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<EmailAddress>::deserialize(deserializer).map(Self)
    }
}
