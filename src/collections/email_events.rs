//! Collection of email events.

use crate::services::emails::EmailEvent;
use crate::types::EventType;
use serde::{Deserialize, Deserializer};

/// An ordered collection of email events, newest first as returned by the
/// API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailEventCollection(Vec<EmailEvent>);

impl EmailEventCollection {
    /// Wraps a list of events.
    pub fn from_vec(items: Vec<EmailEvent>) -> Self {
        Self(items)
    }

    /// The first event, if any.
    pub fn first(&self) -> Option<&EmailEvent> {
        self.0.first()
    }

    /// Events of the given type.
    pub fn of_type(&self, event_type: EventType) -> Self {
        Self(
            self.0
                .iter()
                .filter(|e| e.event_type == event_type)
                .cloned()
                .collect(),
        )
    }

    /// Events that indicate successful handling (injection, delivery).
    pub fn successful(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|e| e.event_type.is_success())
                .cloned()
                .collect(),
        )
    }

    /// Events that indicate a failure (bounces, rejections, generation
    /// failures).
    pub fn failed(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|e| e.event_type.is_failure())
                .cloned()
                .collect(),
        )
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the events in order.
    pub fn iter(&self) -> impl Iterator<Item = &EmailEvent> {
        self.0.iter()
    }
}

impl IntoIterator for EmailEventCollection {
    type Item = EmailEvent;
    type IntoIter = std::vec::IntoIter<EmailEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for EmailEventCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<EmailEvent>::deserialize(deserializer).map(Self)
    }
}
