//! Collection of projects.

use crate::services::projects::Project;
use serde::{Deserialize, Deserializer};

/// An ordered collection of projects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectCollection(Vec<Project>);

impl ProjectCollection {
    /// Wraps a list of projects.
    pub fn from_vec(items: Vec<Project>) -> Self {
        Self(items)
    }

    /// The first project, if any.
    pub fn first(&self) -> Option<&Project> {
        self.0.first()
    }

    /// Finds a project by its numeric id.
    pub fn find_by_id(&self, id: u64) -> Option<&Project> {
        self.0.iter().find(|p| p.id == id)
    }

    /// Finds a project by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&Project> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the projects in order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.0.iter()
    }
}

impl IntoIterator for ProjectCollection {
    type Item = Project;
    type IntoIter = std::vec::IntoIter<Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for ProjectCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Project>::deserialize(deserializer).map(Self)
    }
}
