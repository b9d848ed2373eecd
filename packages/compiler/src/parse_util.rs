//! Parse Utilities
//!
//! Source files, locations and spans attached to template nodes, plus the
//! contextual rendering used by diagnostics.

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLocation {
    pub file: Arc<ParseSourceFile>,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: Arc<ParseSourceFile>, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation {
            file,
            offset,
            line,
            col,
        }
    }

    /// Build a location from a byte offset, computing line and column.
    /// Offsets inside a multi-byte character snap back to its first byte.
    pub fn from_offset(file: Arc<ParseSourceFile>, offset: usize) -> Self {
        let offset = floor_char_boundary(&file.content, offset);
        let before = &file.content[..offset];
        let line = before.matches('\n').count();
        let col = match before.rfind('\n') {
            Some(newline) => offset - newline - 1,
            None => offset,
        };
        ParseLocation::new(file, offset, line, col)
    }

    /// Return the source around the location, up to `max_chars` bytes or
    /// `max_lines` lines on each side.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        if content.is_empty() || self.offset > content.len() {
            return None;
        }
        let offset = floor_char_boundary(content, self.offset);

        let mut start = offset;
        let mut lines = 0;
        for (index, ch) in content[..offset].char_indices().rev() {
            if offset - index > max_chars {
                break;
            }
            if ch == '\n' {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            start = index;
        }

        let mut end = offset;
        lines = 0;
        for (index, ch) in content[offset..].char_indices() {
            if index >= max_chars {
                break;
            }
            if ch == '\n' {
                lines += 1;
                if lines >= max_lines {
                    break;
                }
            }
            end = offset + index + ch.len_utf8();
        }

        Some((
            content[start..offset].to_string(),
            content[offset..end].to_string(),
        ))
    }
}

fn floor_char_boundary(content: &str, offset: usize) -> usize {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// Span covering `start..end` (byte offsets) of `file`.
    pub fn from_offsets(file: &Arc<ParseSourceFile>, start: usize, end: usize) -> Self {
        ParseSourceSpan::new(
            ParseLocation::from_offset(file.clone(), start),
            ParseLocation::from_offset(file.clone(), end),
        )
    }

    /// The source text covered by the span.
    pub fn text(&self) -> &str {
        let content = &self.start.file.content;
        let end = floor_char_boundary(content, self.end.offset);
        let start = floor_char_boundary(content, self.start.offset.min(end));
        &content[start..end]
    }

    /// Render `msg` the way compiler diagnostics print it:
    /// `msg ("before[ERROR ->]after"): url@line:col`.
    pub fn contextual_message(&self, msg: &str) -> String {
        match self.start.get_context(100, 3) {
            Some((before, after)) => {
                format!("{} (\"{}[ERROR ->]{}\"): {}", msg, before, after, self.start)
            }
            None => format!("{}: {}", msg, self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content: &str) -> Arc<ParseSourceFile> {
        Arc::new(ParseSourceFile::new(content, "template.html"))
    }

    #[test]
    fn test_location_from_offset() {
        let file = file("<div>\n  <span on-click(x)/>\n</div>");
        let loc = ParseLocation::from_offset(file, 8);
        assert_eq!(loc.line, 1);
        assert_eq!(loc.col, 2);
        assert_eq!(loc.to_string(), "template.html@1:2");
    }

    #[test]
    fn test_span_text() {
        let file = file("<div class=x/>");
        let span = ParseSourceSpan::from_offsets(&file, 5, 12);
        assert_eq!(span.text(), "class=x");
    }

    #[test]
    fn test_offsets_inside_multibyte_characters() {
        // "é" spans bytes 6..8, "ü" spans bytes 9..11
        let file = file("<p a=\"é\"ü/>");
        let inside = ParseLocation::from_offset(file.clone(), 7);
        assert_eq!(inside.offset, 6);
        assert_eq!(inside.col, 6);

        let span = ParseSourceSpan::from_offsets(&file, 7, 10);
        assert_eq!(span.text(), "é\"");

        let raw = ParseLocation::new(file.clone(), 10, 0, 10);
        let (before, after) = raw.get_context(100, 3).unwrap();
        assert_eq!(before, "<p a=\"é\"");
        assert_eq!(after, "ü/>");

        let span = ParseSourceSpan::new(raw.clone(), raw);
        assert_eq!(span.text(), "");
    }

    #[test]
    fn test_contextual_message() {
        let file = file("<a on-click/>");
        let span = ParseSourceSpan::from_offsets(&file, 3, 11);
        assert_eq!(
            span.contextual_message("oops"),
            "oops (\"<a [ERROR ->]on-click/>\"): template.html@0:3"
        );
    }
}
