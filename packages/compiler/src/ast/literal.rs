//! Literal values
//!
//! A [`Literal`] embeds a compile-time known host value in the tree. The
//! rewrite phase encodes nested sequences and mappings depth first so that
//! every element is itself a rewritten node; the display form is the
//! canonical source text for the value.

use super::{Node, NodeKind, NodeTrait};
use crate::context::CompileContext;
use crate::error::Result;
use crate::output::writer::Writer;
use crate::parse_util::ParseSourceSpan;
use crate::util::{format_number, is_valid_identifier, quote_string};
use indexmap::IndexMap;
use std::fmt;

/// A regular expression literal, printed verbatim as `/pattern/flags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExpLiteral {
    pub pattern: String,
    pub flags: String,
}

impl RegExpLiteral {
    pub fn new(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        RegExpLiteral {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }
}

impl fmt::Display for RegExpLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Absence of a value.
    Undefined,
    /// Explicit no-value.
    Null,
    String(String),
    Bool(bool),
    Number(f64),
    RegExp(RegExpLiteral),
    Array(Vec<Node>),
    Object(IndexMap<String, Node>),
}

impl LiteralValue {
    pub fn is_true(&self) -> bool {
        matches!(self, LiteralValue::Bool(true))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text a scalar contributes when written as output text. Structured
    /// values and the no-value markers have none.
    pub fn text_value(&self) -> Option<String> {
        match self {
            LiteralValue::String(s) => Some(s.clone()),
            LiteralValue::Number(n) => Some(format_number(*n)),
            LiteralValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// String conversion as the target runtime performs it when the value
    /// is concatenated with text: `null` -> `"null"`, arrays joined with
    /// `,` (holes for no-value elements), objects -> `"[object Object]"`.
    /// `None` when an array element is only known at runtime.
    pub fn to_text(&self) -> Option<String> {
        match self {
            LiteralValue::Undefined => Some("undefined".to_string()),
            LiteralValue::Null => Some("null".to_string()),
            LiteralValue::RegExp(re) => Some(re.to_string()),
            LiteralValue::Object(_) => Some("[object Object]".to_string()),
            LiteralValue::Array(items) => items
                .iter()
                .map(|item| match item.as_literal()? {
                    LiteralValue::Undefined | LiteralValue::Null => Some(String::new()),
                    value => value.to_text(),
                })
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(",")),
            scalar => scalar.text_value(),
        }
    }

    /// Truthiness of the value as the target runtime sees it, when it can
    /// be decided at compile time.
    pub fn truthiness(&self) -> Option<bool> {
        match self {
            LiteralValue::Undefined | LiteralValue::Null => Some(false),
            LiteralValue::String(s) => Some(!s.is_empty()),
            LiteralValue::Bool(b) => Some(*b),
            LiteralValue::Number(n) => Some(*n != 0.0 && !n.is_nan()),
            LiteralValue::RegExp(_) | LiteralValue::Array(_) | LiteralValue::Object(_) => {
                Some(true)
            }
        }
    }
}

/// Print a mapping key bare when it is a valid identifier, quoted otherwise.
pub fn format_key(key: &str) -> String {
    if is_valid_identifier(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Undefined => f.write_str("undefined"),
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::String(s) => f.write_str(&quote_string(s)),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => f.write_str(&format_number(*n)),
            LiteralValue::RegExp(re) => write!(f, "{}", re),
            LiteralValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            LiteralValue::Object(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", format_key(key), value)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Bool(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Number(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Number(value as f64)
    }
}

impl From<RegExpLiteral> for LiteralValue {
    fn from(value: RegExpLiteral) -> Self {
        LiteralValue::RegExp(value)
    }
}

impl From<serde_json::Value> for LiteralValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => LiteralValue::Null,
            Value::Bool(b) => LiteralValue::Bool(b),
            Value::Number(n) => LiteralValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => LiteralValue::String(s),
            Value::Array(items) => LiteralValue::Array(
                items
                    .into_iter()
                    .map(|item| Node::Literal(Literal::new(item)))
                    .collect(),
            ),
            Value::Object(fields) => LiteralValue::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Node::Literal(Literal::new(value))))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub source_span: Option<ParseSourceSpan>,
}

impl Literal {
    pub fn new(value: impl Into<LiteralValue>) -> Self {
        Literal {
            value: value.into(),
            source_span: None,
        }
    }

    pub fn undefined() -> Self {
        Literal::new(LiteralValue::Undefined)
    }

    pub fn null() -> Self {
        Literal::new(LiteralValue::Null)
    }

    pub fn with_span(mut self, span: ParseSourceSpan) -> Self {
        self.source_span = Some(span);
        self
    }
}

impl NodeTrait for Literal {
    fn kind(&self) -> NodeKind {
        NodeKind::Literal
    }

    fn rewrite(self, ctx: &mut CompileContext) -> Result<Node> {
        let Literal { value, source_span } = self;
        let value = match value {
            LiteralValue::Array(items) => LiteralValue::Array(
                items
                    .into_iter()
                    .map(|item| item.rewrite(ctx))
                    .collect::<Result<Vec<_>>>()?,
            ),
            LiteralValue::Object(fields) => {
                let mut rewritten = IndexMap::with_capacity(fields.len());
                for (key, value) in fields {
                    rewritten.insert(key, value.rewrite(ctx)?);
                }
                LiteralValue::Object(rewritten)
            }
            scalar => scalar,
        };
        Ok(Node::Literal(Literal { value, source_span }))
    }

    fn emit(&self, writer: &mut dyn Writer) {
        writer.write_literal(&self.value);
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
