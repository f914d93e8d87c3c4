use serde::Serialize;

use crate::tag::decompose::Tag;

/// A selectable entry handed to the caller, e.g. `my-service:1.2.3-4`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOption {
    pub name: String,
    pub value: String,
}

impl TagOption {
    /// An entry that carries a message instead of a tag
    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name: text.clone(),
            value: text,
        }
    }
}

impl From<&Tag> for TagOption {
    fn from(tag: &Tag) -> Self {
        let name = tag.to_string();
        Self {
            value: name.clone(),
            name,
        }
    }
}
