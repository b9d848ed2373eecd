//! Attribute resolution
//!
//! Every attribute of every tag is resolved in two phases. During `enter`
//! modifiers and directives get the first look, then event handler
//! attributes are moved into the tag's handler registry. During `exit`
//! modifiers and directives run again, then the remaining attributes are
//! validated against the tag schema.
//!
//! Tags are visited depth first. For each attribute, in source order, the
//! enter phase is followed by the exit phase before the next attribute is
//! visited; nested tags are resolved after the attributes of their parent.

pub mod directives;
pub mod events;
pub mod modifiers;
pub mod transform;

pub use events::{extract_event_handler, EventName, ATTACH_DETACH_MODULE};
pub use transform::{AttributeTransform, Phase, Transform, TransformFn, TransformRegistry};

use crate::ast::{Attribute, Node, Tag};
use crate::context::CompileContext;
use crate::error::{CompileError, Result};
use crate::schema::TagSchemaProvider;

pub struct AttributeTranslator<'a> {
    registry: &'a TransformRegistry,
    schema: &'a dyn TagSchemaProvider,
}

impl<'a> AttributeTranslator<'a> {
    pub fn new(registry: &'a TransformRegistry, schema: &'a dyn TagSchemaProvider) -> Self {
        AttributeTranslator { registry, schema }
    }

    /// Resolve the attributes of every tag in `nodes`, recursively.
    pub fn translate_nodes(&self, nodes: &mut [Node], ctx: &mut CompileContext) -> Result<()> {
        for node in nodes.iter_mut() {
            if let Node::Tag(tag) = node {
                self.translate_tag(tag, ctx)?;
            }
        }
        Ok(())
    }

    pub fn translate_tag(&self, tag: &mut Tag, ctx: &mut CompileContext) -> Result<()> {
        let attributes = std::mem::take(&mut tag.attributes);
        tag.attributes.reserve(attributes.len());
        for attr in attributes {
            if let Some(attr) = self.resolve_attribute(tag, attr, ctx)? {
                tag.attributes.push(attr);
            }
        }
        self.translate_nodes(&mut tag.body, ctx)
    }

    /// Run both phases for one attribute. `None` when it was removed.
    pub fn resolve_attribute(
        &self,
        tag: &mut Tag,
        attr: Attribute,
        ctx: &mut CompileContext,
    ) -> Result<Option<Attribute>> {
        match self.run_phase(Phase::Enter, tag, attr, ctx)? {
            Some(attr) => self.run_phase(Phase::Exit, tag, attr, ctx),
            None => Ok(None),
        }
    }

    fn run_phase(
        &self,
        phase: Phase,
        tag: &mut Tag,
        mut attr: Attribute,
        ctx: &mut CompileContext,
    ) -> Result<Option<Attribute>> {
        match self.run_transforms(phase, tag, &mut attr, ctx)? {
            Transform::Unchanged => {}
            Transform::Replaced(replacement) => return Ok(Some(replacement)),
            Transform::Removed => return Ok(None),
        }

        match phase {
            Phase::Enter => extract_event_handler(tag, attr, self.schema, ctx),
            Phase::Exit => self.validate(tag, attr).map(Some),
        }
    }

    /// Modifier first, then the directive registered under the attribute's
    /// name. The first handler that does not return `Unchanged` ends the
    /// phase.
    fn run_transforms(
        &self,
        phase: Phase,
        tag: &mut Tag,
        attr: &mut Attribute,
        ctx: &mut CompileContext,
    ) -> Result<Transform> {
        let name = attr.name.clone();

        if let Some(modifier) = attr.modifier.clone() {
            let transform = self.registry.modifier(&modifier).ok_or_else(|| {
                CompileError::UnsupportedModifier {
                    modifier: modifier.clone(),
                    span: attr.source_span.clone(),
                }
            })?;
            if let Some(handler) = transform.handler(phase) {
                let result = handler(tag, attr, ctx)?;
                if result != Transform::Unchanged {
                    tracing::trace!(attribute = %name, %modifier, ?phase, "modifier resolved attribute");
                    return Ok(result);
                }
            }
        }

        if let Some(handler) = self
            .registry
            .directive(&name)
            .and_then(|transform| transform.handler(phase))
        {
            let result = handler(tag, attr, ctx)?;
            if result != Transform::Unchanged {
                tracing::trace!(attribute = %name, ?phase, "directive resolved attribute");
                return Ok(result);
            }
        }

        Ok(Transform::Unchanged)
    }

    fn validate(&self, tag: &Tag, attr: Attribute) -> Result<Attribute> {
        if let Some(def) = self.schema.tag_definition(tag) {
            if !def.html && !def.has_attribute(&attr.name) {
                return Err(CompileError::UnsupportedAttribute {
                    tag: tag.name.clone(),
                    name: attr.name,
                    span: attr.source_span,
                });
            }
        }

        if attr.arguments.as_ref().is_some_and(|args| !args.is_empty()) {
            return Err(CompileError::UnsupportedArguments {
                name: attr.name,
                span: attr.source_span,
            });
        }

        Ok(attr)
    }
}
