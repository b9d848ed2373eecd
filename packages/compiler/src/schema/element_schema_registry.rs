//! Tag schema contract
//!
//! The attribute pipeline asks a [`TagSchemaProvider`] whether a tag is a
//! built-in markup tag and which attributes a tag declares.

use crate::ast::Tag;
use indexmap::IndexSet;

/// Attribute name that lets a definition accept any attribute.
pub const ANY_ATTRIBUTE: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub name: String,
    /// Built-in markup tag. Markup tags accept arbitrary attributes.
    pub html: bool,
    pub attributes: IndexSet<String>,
}

impl TagDefinition {
    /// Definition of a built-in markup tag.
    pub fn html(name: impl Into<String>) -> Self {
        TagDefinition {
            name: name.into(),
            html: true,
            attributes: IndexSet::new(),
        }
    }

    /// Definition of a custom tag declaring `attributes`.
    pub fn custom<I, S>(name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagDefinition {
            name: name.into(),
            html: false,
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name) || self.attributes.contains(ANY_ATTRIBUTE)
    }
}

pub trait TagSchemaProvider {
    /// The schema of `tag`, if one is known.
    fn tag_definition(&self, tag: &Tag) -> Option<&TagDefinition>;

    /// Whether `tag` is a built-in markup tag rather than a custom component.
    fn is_native_tag(&self, tag: &Tag) -> bool {
        self.tag_definition(tag).is_some_and(|def| def.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_definition_attributes() {
        let def = TagDefinition::custom("my-button", ["label", "size"]);
        assert!(!def.html);
        assert!(def.has_attribute("label"));
        assert!(!def.has_attribute("colour"));
    }

    #[test]
    fn test_wildcard_attribute() {
        let def = TagDefinition::custom("passthrough", [ANY_ATTRIBUTE]);
        assert!(def.has_attribute("anything"));
    }
}
