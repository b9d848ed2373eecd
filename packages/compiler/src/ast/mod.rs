//! Template AST
//!
//! Every node goes through the same two-phase lifecycle: `rewrite`
//! consumes the node and returns the node to use in its place (possibly a
//! different one), then `emit` writes the rewritten node to a [`Writer`].
//! Parents own their children; there are no back pointers.

mod expression;
mod literal;
mod tag;
mod text;

pub use expression::{Expr, Expression};
pub use literal::{format_key, Literal, LiteralValue, RegExpLiteral};
pub use tag::{normalize_body, Attribute, EventHandler, HandlerRegistry, Tag, TagFlags};
pub use text::TextNode;

use crate::context::CompileContext;
use crate::error::Result;
use crate::output::writer::{CodeWriter, Writer};
use crate::parse_util::ParseSourceSpan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Literal,
    Expression,
    Text,
    Tag,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Literal => "Literal",
            NodeKind::Expression => "Expression",
            NodeKind::Text => "Text",
            NodeKind::Tag => "Tag",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code generation contract shared by every node type.
pub trait NodeTrait {
    fn kind(&self) -> NodeKind;

    /// Semantic rewrite. Runs once per node, before emission.
    fn rewrite(self, ctx: &mut CompileContext) -> Result<Node>;

    /// Textual emission of an already rewritten node.
    fn emit(&self, writer: &mut dyn Writer);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Literal),
    Expression(Expression),
    Text(TextNode),
    Tag(Tag),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Literal(node) => node.kind(),
            Node::Expression(node) => node.kind(),
            Node::Text(node) => node.kind(),
            Node::Tag(node) => node.kind(),
        }
    }

    pub fn rewrite(self, ctx: &mut CompileContext) -> Result<Node> {
        match self {
            Node::Literal(node) => node.rewrite(ctx),
            Node::Expression(node) => node.rewrite(ctx),
            Node::Text(node) => node.rewrite(ctx),
            Node::Tag(node) => node.rewrite(ctx),
        }
    }

    pub fn emit(&self, writer: &mut dyn Writer) {
        match self {
            Node::Literal(node) => node.emit(writer),
            Node::Expression(node) => node.emit(writer),
            Node::Text(node) => node.emit(writer),
            Node::Tag(node) => node.emit(writer),
        }
    }

    pub fn source_span(&self) -> Option<&ParseSourceSpan> {
        match self {
            Node::Literal(node) => node.source_span.as_ref(),
            Node::Expression(node) => node.source_span.as_ref(),
            Node::Text(node) => node.source_span.as_ref(),
            Node::Tag(node) => node.source_span.as_ref(),
        }
    }

    pub fn literal(value: impl Into<LiteralValue>) -> Node {
        Node::Literal(Literal::new(value))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match self {
            Node::Literal(literal) => Some(&literal.value),
            _ => None,
        }
    }

    /// The literal boolean `true`.
    pub fn is_true(&self) -> bool {
        self.as_literal().is_some_and(LiteralValue::is_true)
    }
}

impl From<Literal> for Node {
    fn from(node: Literal) -> Self {
        Node::Literal(node)
    }
}

impl From<Expression> for Node {
    fn from(node: Expression) -> Self {
        Node::Expression(node)
    }
}

impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Node::Text(node)
    }
}

impl From<Tag> for Node {
    fn from(node: Tag) -> Self {
        Node::Tag(node)
    }
}

pub(crate) fn emit_to_string<T: NodeTrait>(node: &T) -> String {
    let mut writer = CodeWriter::new();
    node.emit(&mut writer);
    writer.to_source()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(literal) => write!(f, "{}", literal),
            other => {
                let mut writer = CodeWriter::new();
                other.emit(&mut writer);
                f.write_str(&writer.to_source())
            }
        }
    }
}
