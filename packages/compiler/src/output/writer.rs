//! Code Writer
//!
//! The sink node `emit` phases write into. Formatting decisions (where
//! lines break, how deep to indent) belong to the writer; nodes only ask for
//! tokens, literals and indentation.

use crate::ast::LiteralValue;
use smallvec::SmallVec;

const INDENT_WITH: &str = "  ";

/// Contract consumed by [`crate::ast::Node::emit`].
pub trait Writer {
    /// Append a raw token. Embedded newlines start new lines.
    fn write(&mut self, token: &str);

    /// Append a literal value in its encoded form.
    fn write_literal(&mut self, value: &LiteralValue);

    /// Append a single indentation unit.
    fn write_indent(&mut self);

    /// Append the indentation of the current nesting level.
    fn write_line_indent(&mut self);
}

#[derive(Debug, Clone, Default)]
struct EmittedLine {
    parts: SmallVec<[String; 8]>,
    parts_length: usize,
}

impl EmittedLine {
    fn push(&mut self, part: &str) {
        if !part.is_empty() {
            self.parts_length += part.len();
            self.parts.push(part.to_string());
        }
    }
}

/// In-memory [`Writer`] producing source text.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl Default for CodeWriter {
    fn default() -> Self {
        CodeWriter::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter {
            lines: vec![EmittedLine::default()],
            indent: 0,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::default());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn line_length(&self) -> usize {
        self.lines.last().map_or(0, |line| line.parts_length)
    }

    pub fn newline(&mut self) {
        self.lines.push(EmittedLine::default());
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    pub fn to_source(&self) -> String {
        let mut lines: Vec<String> = self.lines.iter().map(|line| line.parts.concat()).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

impl Writer for CodeWriter {
    fn write(&mut self, token: &str) {
        let mut pieces = token.split('\n');
        if let Some(first) = pieces.next() {
            self.current_line_mut().push(first);
        }
        for piece in pieces {
            self.newline();
            self.current_line_mut().push(piece);
        }
    }

    fn write_literal(&mut self, value: &LiteralValue) {
        let encoded = value.to_string();
        self.write(&encoded);
    }

    fn write_indent(&mut self) {
        self.current_line_mut().push(INDENT_WITH);
    }

    fn write_line_indent(&mut self) {
        let indent = INDENT_WITH.repeat(self.indent);
        self.current_line_mut().push(&indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_splits_lines() {
        let mut writer = CodeWriter::new();
        writer.write("a +\nb");
        assert_eq!(writer.to_source(), "a +\nb");
        assert_eq!(writer.line_length(), 1);
    }

    #[test]
    fn test_indentation() {
        let mut writer = CodeWriter::new();
        writer.inc_indent();
        writer.inc_indent();
        writer.write("x");
        writer.newline();
        writer.write_line_indent();
        writer.write_indent();
        writer.write("y");
        assert_eq!(writer.to_source(), "x\n      y");
    }

    #[test]
    fn test_write_literal() {
        let mut writer = CodeWriter::new();
        writer.write_literal(&LiteralValue::from("hi"));
        assert_eq!(writer.to_source(), "\"hi\"");
    }

    #[test]
    fn test_trailing_empty_lines_dropped() {
        let mut writer = CodeWriter::new();
        writer.write("done\n");
        assert_eq!(writer.to_source(), "done");
    }
}
