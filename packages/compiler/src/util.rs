//! Utility Functions
//!
//! Identifier checks and scalar formatting shared by the literal encoder,
//! the writer and the attribute pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[$A-Za-z_][0-9A-Za-z_$]*$").unwrap());

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
        "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
        "true", "try", "typeof", "var", "void", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` can be printed as a bare identifier (variable name or
/// object key) without quoting.
pub fn is_valid_identifier(name: &str) -> bool {
    !RESERVED_WORDS.contains(name) && LEGAL_IDENTIFIER_RE.is_match(name)
}

/// Quote `input` as a double quoted string literal.
pub fn quote_string(input: &str) -> String {
    // Serializing a str cannot fail.
    serde_json::to_string(input).unwrap_or_else(|_| format!("\"{}\"", input))
}

/// Print a number the way the target language prints numeric literals.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

/// Lower-case the first character only: `BeforeShow` -> `beforeShow`.
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("a"));
        assert!(is_valid_identifier("$event"));
        assert!(is_valid_identifier("_private1"));
        assert!(!is_valid_identifier("b-c"));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("class"));
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("abc"), "\"abc\"");
        assert_eq!(quote_string("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("BeforeShow"), "beforeShow");
        assert_eq!(lower_first("MouseOver"), "mouseOver");
        assert_eq!(lower_first(""), "");
    }
}
