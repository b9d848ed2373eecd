//! Compile errors
//!
//! Every hard failure of the lowering stage is a [`CompileError`]. Errors
//! are raised at the first point of detection and carry the span of the
//! offending attribute or value so the caller can render a code frame.

use crate::parse_util::ParseSourceSpan;
use thiserror::Error;

/// Coarse classification of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The compiler or one of its extensions is misconfigured.
    Configuration,
    /// The template itself is invalid.
    Usage,
}

#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("Unsupported modifier \"{modifier}\".")]
    UnsupportedModifier {
        modifier: String,
        span: Option<ParseSourceSpan>,
    },

    #[error("Event handler is missing arguments.")]
    MissingHandlerArguments { span: Option<ParseSourceSpan> },

    #[error("\"{name}(handler, ...args)\" does not accept a value.")]
    HandlerValue {
        name: String,
        span: Option<ParseSourceSpan>,
    },

    #[error("Duplicate event handlers are not supported.")]
    DuplicateHandler {
        event: String,
        span: Option<ParseSourceSpan>,
    },

    #[error("<{tag}> does not support the \"{name}\" attribute.")]
    UnsupportedAttribute {
        tag: String,
        name: String,
        span: Option<ParseSourceSpan>,
    },

    #[error("Unsupported arguments on the \"{name}\" attribute.")]
    UnsupportedArguments {
        name: String,
        span: Option<ParseSourceSpan>,
    },

    #[error("The \"{name}\" directive {reason}.")]
    InvalidDirective {
        name: String,
        reason: String,
        span: Option<ParseSourceSpan>,
    },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::UnsupportedModifier { .. } => ErrorKind::Configuration,
            _ => ErrorKind::Usage,
        }
    }

    pub fn span(&self) -> Option<&ParseSourceSpan> {
        match self {
            CompileError::UnsupportedModifier { span, .. }
            | CompileError::MissingHandlerArguments { span }
            | CompileError::HandlerValue { span, .. }
            | CompileError::DuplicateHandler { span, .. }
            | CompileError::UnsupportedAttribute { span, .. }
            | CompileError::UnsupportedArguments { span, .. }
            | CompileError::InvalidDirective { span, .. } => span.as_ref(),
        }
    }

    /// The message with surrounding template source, when a span is known.
    pub fn contextual_message(&self) -> String {
        let msg = self.to_string();
        match self.span() {
            Some(span) => span.contextual_message(&msg),
            None => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
