//! Tags and attributes

use super::{emit_to_string, format_key, Literal, Node, NodeKind, NodeTrait, TextNode};
use crate::context::CompileContext;
use crate::error::Result;
use crate::output::writer::Writer;
use crate::parse_util::ParseSourceSpan;
use crate::util::quote_string;
use bitflags::bitflags;
use indexmap::IndexMap;
use std::fmt;

bitflags! {
    /// Render-time preservation requested by the no-update directives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TagFlags: u8 {
        const PRESERVE = 1 << 0;
        const PRESERVE_BODY = 1 << 1;
        /// Preservation only applies while `Tag::preserve_condition` holds.
        const PRESERVE_IF = 1 << 2;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Node,
    /// Call-style arguments, `on-click(handler)`. `None` when the attribute
    /// was written without parentheses.
    pub arguments: Option<Vec<Node>>,
    pub modifier: Option<String>,
    pub source_span: Option<ParseSourceSpan>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Node>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            arguments: None,
            modifier: None,
            source_span: None,
        }
    }

    /// An attribute written without a value, which means `true`.
    pub fn flag(name: impl Into<String>) -> Self {
        Attribute::new(name, Literal::new(true))
    }

    pub fn with_arguments(mut self, arguments: Vec<Node>) -> Self {
        self.arguments = Some(arguments);
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn with_span(mut self, span: ParseSourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }

    /// Span of the value, falling back to the attribute itself.
    pub fn value_span(&self) -> Option<ParseSourceSpan> {
        self.value
            .source_span()
            .or(self.source_span.as_ref())
            .cloned()
    }

    fn rewrite(self, ctx: &mut CompileContext) -> Result<Attribute> {
        let arguments = match self.arguments {
            Some(arguments) => Some(
                arguments
                    .into_iter()
                    .map(|argument| argument.rewrite(ctx))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok(Attribute {
            value: self.value.rewrite(ctx)?,
            arguments,
            ..self
        })
    }
}

/// Entry of a tag's handler registry.
#[derive(Debug, Clone, PartialEq)]
pub struct EventHandler {
    pub arguments: Vec<Node>,
    /// Detach after the first dispatch.
    pub once: bool,
}

pub type HandlerRegistry = IndexMap<String, EventHandler>;

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub body: Vec<Node>,
    /// Created on the first recognised event attribute.
    pub handlers: Option<HandlerRegistry>,
    pub flags: TagFlags,
    pub preserve_condition: Option<Box<Node>>,
    pub preserved_attributes: Vec<String>,
    pub is_child: bool,
    pub source_span: Option<ParseSourceSpan>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            attributes: Vec::new(),
            body: Vec::new(),
            handlers: None,
            flags: TagFlags::empty(),
            preserve_condition: None,
            preserved_attributes: Vec::new(),
            is_child: false,
            source_span: None,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.body.push(child.into());
        self
    }

    pub fn with_span(mut self, span: ParseSourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }

    pub fn handler(&self, event: &str) -> Option<&EventHandler> {
        self.handlers.as_ref().and_then(|handlers| handlers.get(event))
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        self.handlers.get_or_insert_with(IndexMap::new)
    }

    fn emit_attributes(&self, writer: &mut dyn Writer) {
        if self.attributes.is_empty() {
            writer.write("null");
            return;
        }
        writer.write("{ ");
        for (i, attr) in self.attributes.iter().enumerate() {
            if i != 0 {
                writer.write(", ");
            }
            writer.write(&format_key(&attr.name));
            writer.write(": ");
            attr.value.emit(writer);
        }
        writer.write(" }");
    }
}

/// Body content is always text producers or tags: bare literals and
/// expressions become escaped text.
pub fn normalize_body(nodes: Vec<Node>) -> Vec<Node> {
    let nodes = nodes
        .into_iter()
        .map(|node| match node {
            Node::Literal(_) | Node::Expression(_) => {
                let span = node.source_span().cloned();
                let text = TextNode::dynamic(node);
                Node::Text(TextNode {
                    source_span: span,
                    ..text
                })
            }
            other => other,
        })
        .collect();
    TextNode::merge_adjacent(nodes)
}

impl NodeTrait for Tag {
    fn kind(&self) -> NodeKind {
        NodeKind::Tag
    }

    fn rewrite(mut self, ctx: &mut CompileContext) -> Result<Node> {
        self.attributes = std::mem::take(&mut self.attributes)
            .into_iter()
            .map(|attr| attr.rewrite(ctx))
            .collect::<Result<Vec<_>>>()?;

        if let Some(handlers) = self.handlers.take() {
            let mut rewritten = IndexMap::with_capacity(handlers.len());
            for (event, handler) in handlers {
                let arguments = handler
                    .arguments
                    .into_iter()
                    .map(|argument| argument.rewrite(ctx))
                    .collect::<Result<Vec<_>>>()?;
                rewritten.insert(
                    event,
                    EventHandler {
                        arguments,
                        once: handler.once,
                    },
                );
            }
            self.handlers = Some(rewritten);
        }

        if let Some(condition) = self.preserve_condition.take() {
            self.preserve_condition = Some(Box::new(condition.rewrite(ctx)?));
        }

        let mut body = Vec::with_capacity(self.body.len());
        for child in normalize_body(std::mem::take(&mut self.body)) {
            let child = match child {
                Node::Text(mut text) => {
                    text.is_child = true;
                    Node::Text(text)
                }
                Node::Tag(mut tag) => {
                    tag.is_child = true;
                    Node::Tag(tag)
                }
                other => other,
            };
            body.push(child.rewrite(ctx)?);
        }
        self.body = body;

        Ok(Node::Tag(self))
    }

    fn emit(&self, writer: &mut dyn Writer) {
        writer.write(if self.is_child { ".e(" } else { "out.e(" });
        writer.write(&quote_string(&self.name));
        writer.write(", ");
        self.emit_attributes(writer);
        writer.write(", ");
        writer.write(&self.body.len().to_string());
        writer.write(")");

        for child in &self.body {
            writer.write("\n");
            writer.write_line_indent();
            writer.write_indent();
            child.emit(writer);
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&emit_to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;

    #[test]
    fn test_normalize_body_merges_text() {
        let body = normalize_body(vec![
            Node::from(TextNode::text("Hello ")),
            Node::from(Expression::identifier("name")),
            Node::from(Literal::new("!")),
        ]);
        assert_eq!(body.len(), 1);
        let Node::Text(text) = &body[0] else {
            panic!("expected text node");
        };
        assert_eq!(text.arguments.len(), 3);
        assert!(!text.is_static);
    }

    #[test]
    fn test_handlers_created_lazily() {
        let mut tag = Tag::new("button");
        assert!(tag.handlers.is_none());
        tag.handlers_mut().insert(
            "click".to_string(),
            EventHandler {
                arguments: vec![],
                once: false,
            },
        );
        assert!(tag.handler("click").is_some());
    }
}
