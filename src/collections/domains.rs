//! Collection of sending domains.

use crate::services::domains::Domain;
use crate::types::DomainStatus;
use serde::{Deserialize, Deserializer};

/// An ordered collection of domains with status filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainCollection(Vec<Domain>);

impl DomainCollection {
    /// Wraps a list of domains.
    pub fn from_vec(items: Vec<Domain>) -> Self {
        Self(items)
    }

    /// Domains with the given approval status.
    pub fn with_status(&self, status: DomainStatus) -> Self {
        Self(
            self.0
                .iter()
                .filter(|d| d.status == status)
                .cloned()
                .collect(),
        )
    }

    /// Fully verified domains.
    pub fn verified(&self) -> Self {
        Self(self.0.iter().filter(|d| d.is_verified()).cloned().collect())
    }

    /// Domains still awaiting approval.
    pub fn pending(&self) -> Self {
        self.with_status(DomainStatus::Pending)
    }

    /// Domains currently allowed to send.
    pub fn can_send(&self) -> Self {
        Self(self.0.iter().filter(|d| d.can_send).cloned().collect())
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the domains in order.
    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.0.iter()
    }
}

impl IntoIterator for DomainCollection {
    type Item = Domain;
    type IntoIter = std::vec::IntoIter<Domain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for DomainCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Domain>::deserialize(deserializer).map(Self)
    }
}
