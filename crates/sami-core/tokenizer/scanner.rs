//! Token scanning methods for the markup tokenizer
//!
//! Provides the character navigator and the specialised scanning routines for
//! tags, comments, doctypes, raw-text element content and plain text.

use alloc::{borrow::Cow, vec::Vec};

use super::tokens::{Attribute, TokenType};

/// Character navigation helper for tokenizer
///
/// Provides character-level navigation with position tracking. All markup
/// delimiters are ASCII, so byte offsets found by searching always land on
/// character boundaries.
#[derive(Debug, Clone)]
pub struct CharNavigator<'a> {
    /// Source text being scanned
    source: &'a str,
    /// Current byte position in source
    position: usize,
    /// Current line number (1-based)
    line: usize,
    /// Current column number (1-based)
    column: usize,
    /// Last character processed (for \r\n handling)
    last_char: Option<char>,
}

impl<'a> CharNavigator<'a> {
    /// Create new character navigator
    #[must_use]
    pub const fn new(source: &'a str, position: usize, line: usize, column: usize) -> Self {
        Self {
            source,
            position,
            line,
            column,
            last_char: None,
        }
    }

    /// Get current position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get current line
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Get current column
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Unconsumed remainder of the source
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Peek at current character without advancing
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at the byte `offset` bytes ahead of the current position
    #[must_use]
    pub fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + offset).copied()
    }

    /// Advance by one character
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();

        match ch {
            '\r' => {
                self.line += 1;
                self.column = 1;
            }
            '\n' => {
                // Only increment line if previous char wasn't \r (to handle \r\n properly)
                if self.last_char != Some('\r') {
                    self.line += 1;
                }
                self.column = 1;
            }
            _ => {
                self.column += 1;
            }
        }

        self.last_char = Some(ch);
        Some(ch)
    }

    /// Advance until `byte_count` bytes have been consumed or input ends
    pub fn advance_bytes(&mut self, byte_count: usize) {
        let target = (self.position + byte_count).min(self.source.len());
        while self.position < target {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Advance while `predicate` holds for the current character
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Skip markup whitespace (space, tab, newline, carriage return, form feed)
    pub fn skip_whitespace(&mut self) {
        self.advance_while(is_markup_whitespace);
    }

    /// Check if at end of source
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}

/// Whitespace as the markup grammar defines it
#[must_use]
pub const fn is_markup_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{c}')
}

/// What a `<` at the current position opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupStart {
    /// `<name`
    StartTag,
    /// `</name`
    EndTag,
    /// `<!--`
    Comment,
    /// `<!DOCTYPE`
    Doctype,
    /// `<!x`, `<?x`, `</x` where x does not start a name
    BogusComment,
}

/// Result of scanning a tag
#[derive(Debug, Clone)]
pub struct ScannedTag<'a> {
    /// Start, end or self-closing
    pub token_type: TokenType,
    /// Lowercased tag name
    pub name: Cow<'a, str>,
    /// Attributes in source order
    pub attributes: Vec<Attribute<'a>>,
}

/// Scanner for different token types
#[derive(Debug, Clone)]
pub struct TokenScanner<'a> {
    /// Character navigator for position tracking
    navigator: CharNavigator<'a>,
    /// Source text reference
    source: &'a str,
}

impl<'a> TokenScanner<'a> {
    /// Create new token scanner
    #[must_use]
    pub const fn new(source: &'a str, position: usize, line: usize, column: usize) -> Self {
        Self {
            navigator: CharNavigator::new(source, position, line, column),
            source,
        }
    }

    /// Get current navigator state (immutable)
    #[must_use]
    pub const fn navigator(&self) -> &CharNavigator<'a> {
        &self.navigator
    }

    /// Classify the markup construct starting at the current `<`, if any
    ///
    /// A `<` followed by anything that cannot open markup is plain text.
    #[must_use]
    pub fn markup_start(&self) -> Option<MarkupStart> {
        let rest = self.navigator.rest();
        let bytes = rest.as_bytes();
        if bytes.first() != Some(&b'<') {
            return None;
        }

        match bytes.get(1) {
            Some(b) if b.is_ascii_alphabetic() => Some(MarkupStart::StartTag),
            Some(b'/') => match bytes.get(2) {
                Some(b) if b.is_ascii_alphabetic() => Some(MarkupStart::EndTag),
                Some(_) => Some(MarkupStart::BogusComment),
                None => None,
            },
            Some(b'!') => {
                if rest[2..].starts_with("--") {
                    Some(MarkupStart::Comment)
                } else if rest
                    .get(2..9)
                    .is_some_and(|word| word.eq_ignore_ascii_case("doctype"))
                {
                    Some(MarkupStart::Doctype)
                } else {
                    Some(MarkupStart::BogusComment)
                }
            }
            Some(b'?') => Some(MarkupStart::BogusComment),
            _ => None,
        }
    }

    /// Scan general text content up to the next markup construct
    pub fn scan_text(&mut self) {
        loop {
            match self.navigator.rest().find('<') {
                None => {
                    let remaining = self.navigator.rest().len();
                    self.navigator.advance_bytes(remaining);
                    return;
                }
                Some(offset) => {
                    self.navigator.advance_bytes(offset);
                    if self.markup_start().is_some() {
                        return;
                    }
                    // A lone '<' is literal text
                    self.navigator.advance();
                }
            }
        }
    }

    /// Scan the content of a raw-text element up to its closing tag
    ///
    /// `plaintext` has no closing tag and runs to the end of input.
    pub fn scan_raw_text(&mut self, tag_name: &str) {
        if tag_name == "plaintext" {
            let remaining = self.navigator.rest().len();
            self.navigator.advance_bytes(remaining);
            return;
        }

        loop {
            let rest = self.navigator.rest();
            let Some(offset) = rest.find("</") else {
                self.navigator.advance_bytes(rest.len());
                return;
            };

            let candidate = &rest[offset + 2..];
            let closes = candidate
                .get(..tag_name.len())
                .is_some_and(|name| name.eq_ignore_ascii_case(tag_name))
                && candidate[tag_name.len()..]
                    .chars()
                    .next()
                    .map_or(true, |ch| ch == '>' || ch == '/' || is_markup_whitespace(ch));

            if closes {
                self.navigator.advance_bytes(offset);
                return;
            }
            self.navigator.advance_bytes(offset + 2);
        }
    }

    /// Scan a start or end tag beginning at `<`
    ///
    /// Returns `None` when input ends before the closing `>`; the partial tag
    /// is dropped.
    pub fn scan_tag(&mut self, end_tag: bool) -> Option<ScannedTag<'a>> {
        let tag_start = self.navigator.position();
        self.navigator.advance_bytes(if end_tag { 2 } else { 1 });

        let name_start = self.navigator.position();
        self.navigator
            .advance_while(|ch| !is_markup_whitespace(ch) && ch != '/' && ch != '>');
        let name = lowercase(&self.source[name_start..self.navigator.position()]);

        let mut attributes = Vec::new();
        loop {
            self.navigator
                .advance_while(|ch| is_markup_whitespace(ch) || ch == '/');
            match self.navigator.peek()? {
                '>' => {
                    self.navigator.advance();
                    break;
                }
                _ => attributes.push(self.scan_attribute()?),
            }
        }

        let raw = &self.source[tag_start..self.navigator.position()];
        let token_type = if end_tag {
            TokenType::EndTag
        } else if raw.ends_with("/>") {
            TokenType::SelfClosingTag
        } else {
            TokenType::StartTag
        };

        Some(ScannedTag {
            token_type,
            name,
            attributes,
        })
    }

    /// Scan one attribute, `key`, `key=value`, `key="value"` or `key='value'`
    fn scan_attribute(&mut self) -> Option<Attribute<'a>> {
        let key_start = self.navigator.position();
        // A leading '=' belongs to the key
        if self.navigator.peek() == Some('=') {
            self.navigator.advance();
        }
        self.navigator.advance_while(|ch| {
            !is_markup_whitespace(ch) && ch != '/' && ch != '=' && ch != '>'
        });
        let key = lowercase(&self.source[key_start..self.navigator.position()]);

        self.navigator.skip_whitespace();
        if self.navigator.peek()? != '=' {
            return Some(Attribute::new(key, Cow::Borrowed("")));
        }
        self.navigator.advance();
        self.navigator.skip_whitespace();

        let value = match self.navigator.peek()? {
            quote @ ('"' | '\'') => {
                self.navigator.advance();
                let value_start = self.navigator.position();
                self.navigator.advance_while(|ch| ch != quote);
                let value = &self.source[value_start..self.navigator.position()];
                self.navigator.advance()?;
                value
            }
            _ => {
                let value_start = self.navigator.position();
                self.navigator
                    .advance_while(|ch| !is_markup_whitespace(ch) && ch != '>');
                &self.source[value_start..self.navigator.position()]
            }
        };

        Some(Attribute::new(key, super::entities::decode_entities(value)))
    }

    /// Scan `<!-- ... -->`, returning the comment body
    ///
    /// An unterminated comment runs to the end of input.
    pub fn scan_comment(&mut self) -> &'a str {
        self.navigator.advance_bytes(4);
        let rest = self.navigator.rest();

        // "<!-->" and "<!--->" are complete, empty comments
        for abrupt in [">", "->"] {
            if rest.starts_with(abrupt) {
                self.navigator.advance_bytes(abrupt.len());
                return "";
            }
        }

        match rest.find("-->") {
            Some(end) => {
                self.navigator.advance_bytes(end + 3);
                &rest[..end]
            }
            None => {
                self.navigator.advance_bytes(rest.len());
                rest
            }
        }
    }

    /// Scan a bogus comment like `<?xml ...>` or `<!x>`, returning its body
    pub fn scan_bogus_comment(&mut self) -> &'a str {
        let prefix = if self.navigator.rest().starts_with("</") {
            2
        } else {
            // "<!x>" has body "x", "<?x>" has body "?x"
            usize::from(self.navigator.peek_byte(1) == Some(b'!')) + 1
        };
        self.navigator.advance_bytes(prefix);
        self.scan_until_close()
    }

    /// Scan `<!DOCTYPE name ...>`, returning the declaration body
    pub fn scan_doctype(&mut self) -> &'a str {
        self.navigator.advance_bytes("<!doctype".len());
        self.scan_until_close().trim()
    }

    /// Consume through the next `>` (or to end of input), returning the body
    fn scan_until_close(&mut self) -> &'a str {
        let rest = self.navigator.rest();
        match rest.find('>') {
            Some(end) => {
                self.navigator.advance_bytes(end + 1);
                &rest[..end]
            }
            None => {
                self.navigator.advance_bytes(rest.len());
                rest
            }
        }
    }
}

/// Lowercase ASCII letters, borrowing when already lowercase
fn lowercase(input: &str) -> Cow<'_, str> {
    if input.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(input.to_ascii_lowercase())
    } else {
        Cow::Borrowed(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_tracks_lines() {
        let mut nav = CharNavigator::new("a\r\nb\nc", 0, 1, 1);
        nav.advance_bytes(3);
        assert_eq!(nav.line(), 2);
        assert_eq!(nav.column(), 1);
        nav.advance_bytes(2);
        assert_eq!(nav.line(), 3);
        assert_eq!(nav.peek(), Some('c'));
    }

    #[test]
    fn navigator_stops_at_end() {
        let mut nav = CharNavigator::new("ab", 0, 1, 1);
        nav.advance_bytes(10);
        assert!(nav.is_at_end());
        assert_eq!(nav.advance(), None);
        assert_eq!(nav.peek(), None);
    }

    #[test]
    fn classifies_markup_starts() {
        let cases = [
            ("<p>", Some(MarkupStart::StartTag)),
            ("</p>", Some(MarkupStart::EndTag)),
            ("<!-- x -->", Some(MarkupStart::Comment)),
            ("<!DOCTYPE html>", Some(MarkupStart::Doctype)),
            ("<!doctype html>", Some(MarkupStart::Doctype)),
            ("<?xml?>", Some(MarkupStart::BogusComment)),
            ("</ x>", Some(MarkupStart::BogusComment)),
            ("< p", None),
            ("<3", None),
            ("<", None),
            ("</", None),
        ];
        for (input, expected) in cases {
            let scanner = TokenScanner::new(input, 0, 1, 1);
            assert_eq!(scanner.markup_start(), expected, "input: {input:?}");
        }
    }

    #[test]
    fn scans_tag_with_mixed_attributes() {
        let source = r#"<SYNC Start=1000 ID="a &amp; b" class='x' hidden>"#;
        let mut scanner = TokenScanner::new(source, 0, 1, 1);
        let tag = scanner.scan_tag(false).unwrap();

        assert_eq!(tag.token_type, TokenType::StartTag);
        assert_eq!(tag.name, "sync");
        assert_eq!(tag.attributes.len(), 4);
        assert_eq!(tag.attributes[0].key, "start");
        assert_eq!(tag.attributes[0].value, "1000");
        assert_eq!(tag.attributes[1].key, "id");
        assert_eq!(tag.attributes[1].value, "a & b");
        assert_eq!(tag.attributes[2].value, "x");
        assert_eq!(tag.attributes[3].key, "hidden");
        assert_eq!(tag.attributes[3].value, "");
        assert!(scanner.navigator().is_at_end());
    }

    #[test]
    fn scans_self_closing_tag() {
        let mut scanner = TokenScanner::new("<br/>", 0, 1, 1);
        let tag = scanner.scan_tag(false).unwrap();
        assert_eq!(tag.token_type, TokenType::SelfClosingTag);
        assert_eq!(tag.name, "br");
    }

    #[test]
    fn drops_unterminated_tag() {
        let mut scanner = TokenScanner::new("<sync start=10", 0, 1, 1);
        assert!(scanner.scan_tag(false).is_none());
    }

    #[test]
    fn scans_comment_bodies() {
        let mut scanner = TokenScanner::new("<!-- note -->tail", 0, 1, 1);
        assert_eq!(scanner.scan_comment(), " note ");
        assert_eq!(scanner.navigator().rest(), "tail");

        let mut scanner = TokenScanner::new("<!-->x", 0, 1, 1);
        assert_eq!(scanner.scan_comment(), "");
        assert_eq!(scanner.navigator().rest(), "x");

        let mut scanner = TokenScanner::new("<!-- open", 0, 1, 1);
        assert_eq!(scanner.scan_comment(), " open");
        assert!(scanner.navigator().is_at_end());
    }

    #[test]
    fn raw_text_stops_at_matching_close() {
        let source = "P { color: red } </p> </STYLE>";
        let mut scanner = TokenScanner::new(source, 0, 1, 1);
        scanner.scan_raw_text("style");
        assert_eq!(scanner.navigator().rest(), "</STYLE>");
    }

    #[test]
    fn scan_text_skips_lone_angle_brackets() {
        let mut scanner = TokenScanner::new("1 < 2 <b>", 0, 1, 1);
        scanner.scan_text();
        assert_eq!(scanner.navigator().rest(), "<b>");
    }
}
