//! Collection of event types for webhook subscriptions.

use crate::types::EventType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A deduplicated, order-preserving set of event types.
///
/// Duplicates are dropped on construction and on `add`, keeping the first
/// occurrence's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTypeCollection(Vec<EventType>);

impl EventTypeCollection {
    /// Builds a collection, dropping duplicate entries.
    pub fn from_vec(items: Vec<EventType>) -> Self {
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Self(unique)
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every known event type.
    pub fn all_types() -> Self {
        Self(EventType::ALL.to_vec())
    }

    /// Delivery pipeline events (injection through generation failures).
    pub fn delivery_events() -> Self {
        Self(vec![
            EventType::Injection,
            EventType::Delivery,
            EventType::Bounce,
            EventType::Delay,
            EventType::PolicyRejection,
            EventType::OutOfBand,
            EventType::GenerationFailure,
            EventType::GenerationRejection,
        ])
    }

    /// Recipient engagement events.
    pub fn engagement_events() -> Self {
        Self(vec![
            EventType::Open,
            EventType::InitialOpen,
            EventType::Click,
        ])
    }

    /// Returns a new collection with the type appended, unless already
    /// present.
    pub fn add(&self, event_type: EventType) -> Self {
        if self.0.contains(&event_type) {
            return self.clone();
        }
        let mut items = self.0.clone();
        items.push(event_type);
        Self(items)
    }

    /// Membership check.
    pub fn contains(&self, event_type: EventType) -> bool {
        self.0.contains(&event_type)
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EventType> {
        self.0.iter()
    }

    /// The wire values, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl IntoIterator for EventTypeCollection {
    type Item = EventType;
    type IntoIter = std::vec::IntoIter<EventType>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for EventTypeCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventTypeCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<EventType>::deserialize(deserializer).map(Self::from_vec)
    }
}
