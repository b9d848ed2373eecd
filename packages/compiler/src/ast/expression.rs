//! Opaque expressions
//!
//! Expressions are references to host-language code the lowering stage does
//! not evaluate: identifiers, raw code handed over by the parser, and the
//! small set of call/member/concatenation shapes the transforms synthesize.

use super::{Node, NodeKind, NodeTrait};
use crate::context::CompileContext;
use crate::error::Result;
use crate::output::writer::Writer;
use crate::parse_util::ParseSourceSpan;
use crate::util::{is_valid_identifier, quote_string};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Member {
        object: Box<Node>,
        property: String,
    },
    /// `a + b + c`
    Concat(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub expr: Expr,
    pub source_span: Option<ParseSourceSpan>,
}

impl Expression {
    pub fn new(expr: Expr) -> Self {
        Expression {
            expr,
            source_span: None,
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::new(Expr::Identifier(name.into()))
    }

    pub fn call(callee: impl Into<Node>, arguments: Vec<Node>) -> Self {
        Expression::new(Expr::Call {
            callee: Box::new(callee.into()),
            arguments,
        })
    }

    pub fn member(object: impl Into<Node>, property: impl Into<String>) -> Self {
        Expression::new(Expr::Member {
            object: Box::new(object.into()),
            property: property.into(),
        })
    }

    pub fn concat(parts: Vec<Node>) -> Self {
        Expression::new(Expr::Concat(parts))
    }

    pub fn with_span(mut self, span: ParseSourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }
}

impl NodeTrait for Expression {
    fn kind(&self) -> NodeKind {
        NodeKind::Expression
    }

    fn rewrite(self, ctx: &mut CompileContext) -> Result<Node> {
        let Expression { expr, source_span } = self;
        let expr = match expr {
            Expr::Call { callee, arguments } => Expr::Call {
                callee: Box::new(callee.rewrite(ctx)?),
                arguments: rewrite_all(arguments, ctx)?,
            },
            Expr::Member { object, property } => Expr::Member {
                object: Box::new(object.rewrite(ctx)?),
                property,
            },
            Expr::Concat(parts) => Expr::Concat(rewrite_all(parts, ctx)?),
            leaf => leaf,
        };
        Ok(Node::Expression(Expression { expr, source_span }))
    }

    fn emit(&self, writer: &mut dyn Writer) {
        match &self.expr {
            Expr::Identifier(name) => writer.write(name),
            Expr::Call { callee, arguments } => {
                callee.emit(writer);
                writer.write("(");
                for (i, argument) in arguments.iter().enumerate() {
                    if i != 0 {
                        writer.write(", ");
                    }
                    argument.emit(writer);
                }
                writer.write(")");
            }
            Expr::Member { object, property } => {
                object.emit(writer);
                if is_valid_identifier(property) {
                    writer.write(".");
                    writer.write(property);
                } else {
                    writer.write("[");
                    writer.write(&quote_string(property));
                    writer.write("]");
                }
            }
            Expr::Concat(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i != 0 {
                        writer.write(" + ");
                    }
                    part.emit(writer);
                }
            }
        }
    }
}

fn rewrite_all(nodes: Vec<Node>, ctx: &mut CompileContext) -> Result<Vec<Node>> {
    nodes.into_iter().map(|node| node.rewrite(ctx)).collect()
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::emit_to_string(self))
    }
}
