//! Escaping rules for the SAMI renderer
//!
//! Text is escaped the way a generic markup serializer does it, except when
//! it contains a legitimate literal: a substring the parser put there on
//! purpose and that must survive unescaped.

use std::io::{self, Write};

/// Substrings that make a text node bypass escaping
pub const LEGIT_LITERALS: &[&str] = &["&nbsp", "i>", "b>"];

/// Characters the escaper replaces
const ESCAPED_CHARS: &[char] = &['&', '\'', '<', '>', '"', '\r'];

/// Check if `text` contains any legitimate literal
#[must_use]
pub fn has_legit_literal(text: &str) -> bool {
    LEGIT_LITERALS.iter().any(|literal| text.contains(literal))
}

/// Entity for an escaped character
const fn escape_for(ch: char) -> &'static str {
    match ch {
        '&' => "&amp;",
        '\'' => "&#39;",
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&#34;",
        _ => "&#13;",
    }
}

/// Write `text` with `& ' < > " \r` replaced by entities
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn escape_string<W: Write + ?Sized>(writer: &mut W, text: &str) -> io::Result<()> {
    let mut rest = text;
    while let Some(index) = rest.find(ESCAPED_CHARS) {
        writer.write_all(rest[..index].as_bytes())?;
        // Every escaped character is one byte wide
        let ch = char::from(rest.as_bytes()[index]);
        writer.write_all(escape_for(ch).as_bytes())?;
        rest = &rest[index + 1..];
    }
    writer.write_all(rest.as_bytes())
}

/// Escape into a fresh string
#[must_use]
pub fn escape_to_string(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    // Writing to a Vec cannot fail
    let _ = escape_string(&mut out, text);
    String::from_utf8(out).unwrap_or_default()
}

/// Write `value` in quotes: double unless it contains `"`, then single
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn write_quoted<W: Write + ?Sized>(writer: &mut W, value: &str) -> io::Result<()> {
    let quote: &[u8] = if value.contains('"') { b"'" } else { b"\"" };
    writer.write_all(quote)?;
    writer.write_all(value.as_bytes())?;
    writer.write_all(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape_to_string("a & b < c > d \"e\" 'f'\r"),
            "a &amp; b &lt; c &gt; d &#34;e&#34; &#39;f&#39;&#13;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_to_string("plain text, ünïcode"), "plain text, ünïcode");
        assert_eq!(escape_to_string(""), "");
    }

    #[test]
    fn detects_legit_literals() {
        assert!(has_legit_literal("&nbsp;"));
        assert!(has_legit_literal("&nbsp"));
        assert!(has_legit_literal("<i>Hi</i>"));
        assert!(has_legit_literal("</b>"));
        assert!(!has_legit_literal("Tom & Jerry"));
        assert!(!has_legit_literal("<u>x</u>"));
    }

    #[test]
    fn quotes_identifiers() {
        let mut out = Vec::new();
        write_quoted(&mut out, "-//W3C//DTD").unwrap();
        write_quoted(&mut out, "say \"hi\"").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"-//W3C//DTD\"'say \"hi\"'");
    }
}
