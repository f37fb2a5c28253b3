//! Collection of email attachments.

use crate::services::emails::Attachment;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered collection of attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentCollection(Vec<Attachment>);

impl AttachmentCollection {
    /// Wraps a list of attachments.
    pub fn from_vec(items: Vec<Attachment>) -> Self {
        Self(items)
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new collection with the attachment appended.
    pub fn add(&self, attachment: Attachment) -> Self {
        let mut items = self.0.clone();
        items.push(attachment);
        Self(items)
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the attachments in order.
    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.0.iter()
    }
}

impl IntoIterator for AttachmentCollection {
    type Item = Attachment;
    type IntoIter = std::vec::IntoIter<Attachment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for AttachmentCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttachmentCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Attachment>::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{Base64Data, MimeType};

    fn attachment(name: &str) -> Attachment {
        Attachment::from_base64(
            name,
            MimeType::new(MimeType::TEXT_PLAIN).unwrap(),
            Base64Data::from_bytes(b"content"),
        )
    }

    #[test]
    fn add_preserves_order_and_original() {
        let one = AttachmentCollection::empty().add(attachment("a.txt"));
        let two = one.add(attachment("b.txt"));

        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        let names: Vec<_> = two.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }
}
