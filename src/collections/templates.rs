//! Collection of templates.

use crate::services::templates::Template;
use serde::{Deserialize, Deserializer};

/// An ordered collection of templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCollection(Vec<Template>);

impl TemplateCollection {
    /// Wraps a list of templates.
    pub fn from_vec(items: Vec<Template>) -> Self {
        Self(items)
    }

    /// The first template, if any.
    pub fn first(&self) -> Option<&Template> {
        self.0.first()
    }

    /// Templates belonging to the given project.
    pub fn for_project(&self, project_id: u64) -> Self {
        Self(
            self.0
                .iter()
                .filter(|t| t.project_id == project_id)
                .cloned()
                .collect(),
        )
    }

    /// Templates in the given folder; `None` matches templates without a
    /// folder.
    pub fn for_folder(&self, folder_id: Option<u64>) -> Self {
        Self(
            self.0
                .iter()
                .filter(|t| t.folder_id == folder_id)
                .cloned()
                .collect(),
        )
    }

    /// Finds a template by its slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Template> {
        self.0.iter().find(|t| t.slug == slug)
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the templates in order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.0.iter()
    }
}

impl IntoIterator for TemplateCollection {
    type Item = Template;
    type IntoIter = std::vec::IntoIter<Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for TemplateCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Template>::deserialize(deserializer).map(Self)
    }
}
