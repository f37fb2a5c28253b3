//! Collection of webhooks.

use crate::services::webhooks::Webhook;
use serde::{Deserialize, Deserializer};

/// An ordered collection of webhooks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookCollection(Vec<Webhook>);

impl WebhookCollection {
    /// Wraps a list of webhooks.
    pub fn from_vec(items: Vec<Webhook>) -> Self {
        Self(items)
    }

    /// Webhooks currently enabled.
    pub fn enabled(&self) -> Self {
        Self(self.0.iter().filter(|w| w.enabled).cloned().collect())
    }

    /// Webhooks currently disabled.
    pub fn disabled(&self) -> Self {
        Self(self.0.iter().filter(|w| !w.enabled).cloned().collect())
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the webhooks in order.
    pub fn iter(&self) -> impl Iterator<Item = &Webhook> {
        self.0.iter()
    }
}

impl IntoIterator for WebhookCollection {
    type Item = Webhook;
    type IntoIter = std::vec::IntoIter<Webhook>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for WebhookCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Webhook>::deserialize(deserializer).map(Self)
    }
}
