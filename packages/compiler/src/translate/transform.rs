//! Attribute transforms
//!
//! Directives are keyed by exact attribute name, modifiers by the tag after
//! the attribute's colon (`key:scoped`). Both supply optional handlers for
//! the enter and exit phases. The registry is an explicit table built once;
//! hosts extend a copy of it with their own transforms.

use super::{directives, modifiers};
use crate::ast::{Attribute, Tag};
use crate::context::CompileContext;
use crate::error::Result;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Exit,
}

/// What a handler did to the attribute it was given.
///
/// Only the attribute can be swapped out. The owning tag is edited in place
/// through `&mut Tag` and keeps its identity for the rest of resolution; a
/// handler that restructures the tag still reports the attribute's fate
/// here, usually `Removed`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Nothing that ends resolution; in-place edits are allowed.
    Unchanged,
    /// The attribute is replaced; resolution for this phase stops.
    Replaced(Attribute),
    /// The attribute is deleted from the tag.
    Removed,
}

pub type TransformFn = fn(&mut Tag, &mut Attribute, &mut CompileContext) -> Result<Transform>;

#[derive(Clone, Copy, Default)]
pub struct AttributeTransform {
    pub enter: Option<TransformFn>,
    pub exit: Option<TransformFn>,
}

impl fmt::Debug for AttributeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeTransform")
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .finish()
    }
}

impl AttributeTransform {
    pub fn enter(handler: TransformFn) -> Self {
        AttributeTransform {
            enter: Some(handler),
            exit: None,
        }
    }

    pub fn exit(handler: TransformFn) -> Self {
        AttributeTransform {
            enter: None,
            exit: Some(handler),
        }
    }

    pub fn handler(&self, phase: Phase) -> Option<TransformFn> {
        match phase {
            Phase::Enter => self.enter,
            Phase::Exit => self.exit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    directives: IndexMap<String, AttributeTransform>,
    modifiers: IndexMap<String, AttributeTransform>,
}

static BUILTIN: Lazy<TransformRegistry> = Lazy::new(|| {
    let mut registry = TransformRegistry::default();
    directives::register_builtin(&mut registry);
    modifiers::register_builtin(&mut registry);
    registry
});

impl TransformRegistry {
    /// The built-in directives and modifiers.
    pub fn builtin() -> &'static TransformRegistry {
        &BUILTIN
    }

    pub fn register_directive(
        &mut self,
        name: impl Into<String>,
        transform: AttributeTransform,
    ) -> &mut Self {
        self.directives.insert(name.into(), transform);
        self
    }

    pub fn register_modifier(
        &mut self,
        name: impl Into<String>,
        transform: AttributeTransform,
    ) -> &mut Self {
        self.modifiers.insert(name.into(), transform);
        self
    }

    pub fn with_directive(mut self, name: impl Into<String>, transform: AttributeTransform) -> Self {
        self.register_directive(name, transform);
        self
    }

    pub fn with_modifier(mut self, name: impl Into<String>, transform: AttributeTransform) -> Self {
        self.register_modifier(name, transform);
        self
    }

    pub fn directive(&self, name: &str) -> Option<&AttributeTransform> {
        self.directives.get(name)
    }

    pub fn modifier(&self, name: &str) -> Option<&AttributeTransform> {
        self.modifiers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut Tag, _: &mut Attribute, _: &mut CompileContext) -> Result<Transform> {
        Ok(Transform::Unchanged)
    }

    #[test]
    fn test_builtin_registry() {
        let registry = TransformRegistry::builtin();
        assert!(registry.directive("no-update").is_some());
        assert!(registry.directive("class").is_some());
        assert!(registry.modifier("scoped").is_some());
        assert!(registry.modifier("bogus").is_none());
    }

    #[test]
    fn test_extend_copy_of_builtin() {
        let registry = TransformRegistry::builtin()
            .clone()
            .with_directive("my-directive", AttributeTransform::exit(noop));
        assert!(registry.directive("my-directive").is_some());
        assert!(TransformRegistry::builtin().directive("my-directive").is_none());
        let handler = registry.directive("my-directive").unwrap();
        assert!(handler.handler(Phase::Enter).is_none());
        assert!(handler.handler(Phase::Exit).is_some());
    }
}
