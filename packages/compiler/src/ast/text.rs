//! Text producers
//!
//! A [`TextNode`] is a run of output text made of literal fragments and
//! dynamic expressions. Adjacent producers with the same escaping are
//! merged so fewer text calls are emitted, and literal fragments are
//! concatenated at compile time.

use super::{Expression, Literal, LiteralValue, Node, NodeKind, NodeTrait};
use crate::context::CompileContext;
use crate::error::Result;
use crate::output::writer::Writer;
use crate::parse_util::ParseSourceSpan;

const STR_HELPER: &str = "str";

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    /// Never empty.
    pub arguments: Vec<Node>,
    pub is_static: bool,
    pub escape: bool,
    /// Nested directly under another producer; emitted as a chained call.
    pub is_child: bool,
    pub create_text_id: Option<String>,
    pub str_func_id: Option<String>,
    pub source_span: Option<ParseSourceSpan>,
}

impl TextNode {
    pub fn new(argument: impl Into<Node>, is_static: bool, escape: bool) -> Self {
        TextNode {
            arguments: vec![argument.into()],
            is_static,
            escape,
            is_child: false,
            create_text_id: None,
            str_func_id: None,
            source_span: None,
        }
    }

    /// Static, escaped text.
    pub fn text(value: impl Into<String>) -> Self {
        TextNode::new(Literal::new(value.into()), true, true)
    }

    /// Escaped text computed at runtime.
    pub fn dynamic(argument: impl Into<Node>) -> Self {
        let argument = argument.into();
        let is_static = argument.is_literal();
        TextNode::new(argument, is_static, true)
    }

    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_span(mut self, span: ParseSourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }

    /// Emit through a text factory created ahead of time by the host, e.g.
    /// a hoisted `createText` call. Only honoured for static text.
    pub fn with_create_text_id(mut self, id: impl Into<String>) -> Self {
        self.create_text_id = Some(id.into());
        self
    }

    /// Merge `other` into this node.
    ///
    /// Fails, handing `other` back untouched, when the escape flags differ;
    /// the caller keeps both nodes in that case.
    pub fn append(&mut self, other: TextNode) -> std::result::Result<(), TextNode> {
        if other.escape != self.escape {
            return Err(other);
        }

        if !other.is_static {
            self.is_static = false;
        }

        if other.str_func_id.is_some() {
            self.str_func_id = other.str_func_id;
        }

        for argument in other.arguments {
            self.append_argument(argument);
        }

        Ok(())
    }

    /// Adjacent literals always collapse into one argument. Their text is
    /// joined at compile time when both convert to text; a literal holding
    /// runtime elements is joined with its neighbour by a concatenation.
    fn append_argument(&mut self, argument: Node) {
        let last_is_literal = matches!(self.arguments.last(), Some(Node::Literal(_)));
        let incoming = match (last_is_literal, argument) {
            (true, Node::Literal(incoming)) => incoming,
            (_, argument) => {
                self.arguments.push(argument);
                return;
            }
        };
        let Some(Node::Literal(mut last)) = self.arguments.pop() else {
            return;
        };

        match (last.value.to_text(), incoming.value.to_text()) {
            (Some(left), Some(right)) => {
                last.value = LiteralValue::String(left + &right);
                self.arguments.push(Node::Literal(last));
            }
            _ => {
                let span = last.source_span.clone();
                let mut joined =
                    Expression::concat(vec![Node::Literal(last), Node::Literal(incoming)]);
                joined.source_span = span;
                self.arguments.push(Node::Expression(joined));
            }
        }
    }

    /// Fold runs of adjacent text nodes into as few producers as possible.
    pub fn merge_adjacent(nodes: Vec<Node>) -> Vec<Node> {
        let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
        for node in nodes {
            let node = match (merged.last_mut(), node) {
                (Some(Node::Text(previous)), Node::Text(text)) => match previous.append(text) {
                    Ok(()) => continue,
                    Err(text) => {
                        tracing::trace!("escape mismatch, keeping text nodes separate");
                        Node::Text(text)
                    }
                },
                (_, node) => node,
            };
            merged.push(node);
        }
        merged
    }

    fn function_name(&self) -> &'static str {
        if self.escape {
            "t"
        } else {
            "h"
        }
    }
}

impl NodeTrait for TextNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Text
    }

    fn rewrite(mut self, ctx: &mut CompileContext) -> Result<Node> {
        ctx.register_optimizer();

        let arguments = std::mem::take(&mut self.arguments);
        self.arguments = arguments
            .into_iter()
            .map(|argument| argument.rewrite(ctx))
            .collect::<Result<Vec<_>>>()?;

        if self.arguments.iter().any(|argument| !argument.is_literal()) {
            self.str_func_id = Some(ctx.helper(STR_HELPER));
        }

        Ok(Node::Text(self))
    }

    fn emit(&self, writer: &mut dyn Writer) {
        let func_name = self.function_name();

        if self.is_child {
            writer.write(".");
            writer.write(func_name);
        } else if let (true, Some(create_text_id)) = (self.is_static, &self.create_text_id) {
            writer.write(create_text_id);
        } else {
            writer.write("out.");
            writer.write(func_name);
        }

        writer.write("(");
        for (i, argument) in self.arguments.iter().enumerate() {
            if i != 0 {
                writer.write(" +\n");
                writer.write_line_indent();
                writer.write_indent();
            }

            match (argument, &self.str_func_id) {
                (Node::Literal(_), _) | (_, None) => argument.emit(writer),
                (_, Some(str_func_id)) => {
                    writer.write(str_func_id);
                    writer.write("(");
                    argument.emit(writer);
                    writer.write(")");
                }
            }
        }
        writer.write(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;

    #[test]
    fn test_literal_fragments_merge() {
        let mut text = TextNode::text("ab");
        assert!(text.append(TextNode::text("cd")).is_ok());
        assert_eq!(text.arguments.len(), 1);
        assert_eq!(text.arguments[0], Node::from(Literal::new("abcd")));
        assert!(text.is_static);
    }

    #[test]
    fn test_escape_mismatch_leaves_both_untouched() {
        let mut text = TextNode::text("ab");
        let raw = TextNode::text("<b>").with_escape(false);
        let before = text.clone();
        let returned = text.append(raw.clone()).unwrap_err();
        assert_eq!(text, before);
        assert_eq!(returned, raw);
    }

    #[test]
    fn test_dynamic_append_marks_non_static() {
        let mut text = TextNode::text("Hello ");
        text.append(TextNode::dynamic(Expression::identifier("name")))
            .unwrap();
        text.append(TextNode::text("!")).unwrap();
        assert!(!text.is_static);
        assert_eq!(text.arguments.len(), 3);
    }

    #[test]
    fn test_str_func_id_adopted() {
        let mut text = TextNode::text("a");
        let mut other = TextNode::dynamic(Expression::identifier("b"));
        other.str_func_id = Some("rt_str".to_string());
        text.append(other).unwrap();
        assert_eq!(text.str_func_id.as_deref(), Some("rt_str"));
    }

    #[test]
    fn test_rewrite_requests_str_helper_once() {
        let mut ctx = CompileContext::new(CompilerConfig::default());
        let mut text = TextNode::dynamic(Expression::identifier("a"));
        text.append(TextNode::dynamic(Expression::identifier("b")))
            .unwrap();
        let node = Node::Text(text).rewrite(&mut ctx).unwrap();
        let Node::Text(text) = node else {
            panic!("expected text node");
        };
        assert_eq!(text.str_func_id.as_deref(), Some("rt_str"));
        assert_eq!(ctx.helpers().count(), 1);
    }
}
