//! Markup tokenizer module
//!
//! Provides zero-copy lexical analysis of SAMI documents. SAMI is an
//! SGML-flavoured dialect, so the tokenizer follows the generic HTML rules
//! SAMI tooling relies on: lowercased tag names and attribute keys, quoted or
//! unquoted attribute values, comments, doctypes, and raw-text elements
//! (`<STYLE>`, `<TITLE>`, ...) whose content arrives as a single text token.
//!
//! The tokenizer is pull-based: [`MarkupTokenizer::next`] advances and
//! classifies, and accessor methods expose the current token.
//!
//! # Example
//!
//! ```rust
//! use sami_core::tokenizer::{MarkupTokenizer, TokenType};
//!
//! let mut tokenizer = MarkupTokenizer::new("<SYNC Start=1000><P>Hello");
//!
//! assert_eq!(tokenizer.next(), TokenType::StartTag);
//! assert_eq!(tokenizer.tag_name(), Some("sync"));
//! assert_eq!(tokenizer.attr("start"), Some("1000"));
//!
//! assert_eq!(tokenizer.next(), TokenType::StartTag);
//! assert_eq!(tokenizer.next(), TokenType::Text);
//! assert_eq!(tokenizer.text(), "Hello");
//!
//! assert_eq!(tokenizer.next(), TokenType::Error);
//! assert!(tokenizer.err().is_some_and(|e| e.is_eof()));
//! ```

use alloc::{borrow::Cow, vec::Vec};

use thiserror::Error;

pub mod entities;
pub mod scanner;
pub mod tokens;

// Re-export public API
pub use scanner::{CharNavigator, MarkupStart, TokenScanner};
pub use tokens::{Attribute, Token, TokenType};

/// Elements whose content is not tokenized as markup
pub const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "textarea",
    "title",
    "xmp",
];

/// Raw-text elements whose content still has entities decoded
const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

/// Tokenizer limits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Largest accepted token, in bytes; `None` means unlimited
    pub max_token_len: Option<usize>,
}

impl TokenizerConfig {
    /// Config with a token size limit
    #[must_use]
    pub const fn with_max_token_len(limit: usize) -> Self {
        Self {
            max_token_len: Some(limit),
        }
    }
}

/// Why the tokenizer produced an error token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// Input exhausted; not a failure
    #[error("end of input")]
    Eof,

    /// A single token exceeded the configured size limit
    #[error("token at line {line}, column {column} exceeds the {limit}-byte limit")]
    TokenTooLong {
        limit: usize,
        line: usize,
        column: usize,
    },
}

impl TokenizerError {
    /// Check if this is the benign end of input
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

/// Pull-based markup tokenizer with zero-copy raw spans
#[derive(Debug, Clone)]
pub struct MarkupTokenizer<'a> {
    /// Source text being tokenized
    source: &'a str,
    /// Token scanner for character processing
    scanner: TokenScanner<'a>,
    /// Size limits
    config: TokenizerConfig,
    /// Type of the current token
    token_type: TokenType,
    /// Exact source span of the current token
    raw: &'a str,
    /// Body of the current comment or doctype
    data: &'a str,
    /// Lowercased name of the current tag
    tag_name: Cow<'a, str>,
    /// Attributes of the current tag
    attributes: Vec<Attribute<'a>>,
    /// Whether the current text token skips entity decoding
    text_is_raw: bool,
    /// Raw-text element whose content is scanned next
    raw_tag: Option<&'static str>,
    /// Sticky error state
    err: Option<TokenizerError>,
    /// Line of the current token (1-based)
    line: usize,
    /// Column of the current token (1-based)
    column: usize,
}

impl<'a> MarkupTokenizer<'a> {
    /// Create new tokenizer for source text
    ///
    /// A leading byte order mark is skipped.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, TokenizerConfig::default())
    }

    /// Create new tokenizer with explicit limits
    #[must_use]
    pub fn with_config(source: &'a str, config: TokenizerConfig) -> Self {
        let initial_position = if source.starts_with('\u{FEFF}') {
            3 // BOM is 3 bytes
        } else {
            0
        };

        Self {
            source,
            scanner: TokenScanner::new(source, initial_position, 1, 1),
            config,
            token_type: TokenType::Error,
            raw: "",
            data: "",
            tag_name: Cow::Borrowed(""),
            attributes: Vec::new(),
            text_is_raw: false,
            raw_tag: None,
            err: None,
            line: 1,
            column: 1,
        }
    }

    /// Advance to the next token and return its type
    ///
    /// Returns [`TokenType::Error`] at end of input or on failure, and keeps
    /// returning it afterwards; [`Self::err`] tells the two apart.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> TokenType {
        self.reset_current();
        if self.err.is_some() {
            return TokenType::Error;
        }

        let start = self.scanner.navigator().position();
        self.line = self.scanner.navigator().line();
        self.column = self.scanner.navigator().column();

        if let Some(tag) = self.raw_tag.take() {
            self.scanner.scan_raw_text(tag);
            if self.scanner.navigator().position() > start {
                self.text_is_raw = !ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag);
                return self.finish(TokenType::Text, start);
            }
        }

        if self.scanner.navigator().is_at_end() {
            return self.fail(TokenizerError::Eof);
        }

        let token_type = match self.scanner.markup_start() {
            None => {
                self.scanner.scan_text();
                TokenType::Text
            }
            Some(kind @ (MarkupStart::StartTag | MarkupStart::EndTag)) => {
                let Some(tag) = self.scanner.scan_tag(kind == MarkupStart::EndTag) else {
                    // Input ended inside the tag; the partial tag is dropped
                    return self.fail(TokenizerError::Eof);
                };
                if tag.token_type == TokenType::StartTag {
                    self.raw_tag = RAW_TEXT_ELEMENTS
                        .iter()
                        .find(|name| **name == tag.name)
                        .copied();
                }
                self.tag_name = tag.name;
                self.attributes = tag.attributes;
                tag.token_type
            }
            Some(MarkupStart::Comment) => {
                self.data = self.scanner.scan_comment();
                TokenType::Comment
            }
            Some(MarkupStart::BogusComment) => {
                self.data = self.scanner.scan_bogus_comment();
                TokenType::Comment
            }
            Some(MarkupStart::Doctype) => {
                self.data = self.scanner.scan_doctype();
                TokenType::Doctype
            }
        };

        self.finish(token_type, start)
    }

    /// Record the span of the token just scanned, enforcing the size limit
    fn finish(&mut self, token_type: TokenType, start: usize) -> TokenType {
        let raw = &self.source[start..self.scanner.navigator().position()];

        if let Some(limit) = self.config.max_token_len {
            if raw.len() > limit {
                return self.fail(TokenizerError::TokenTooLong {
                    limit,
                    line: self.line,
                    column: self.column,
                });
            }
        }

        self.raw = raw;
        self.token_type = token_type;
        token_type
    }

    /// Enter the sticky error state
    fn fail(&mut self, error: TokenizerError) -> TokenType {
        self.reset_current();
        self.err = Some(error);
        TokenType::Error
    }

    /// Forget everything about the previous token
    fn reset_current(&mut self) {
        self.token_type = TokenType::Error;
        self.raw = "";
        self.data = "";
        self.tag_name = Cow::Borrowed("");
        self.attributes.clear();
        self.text_is_raw = false;
    }

    /// Type of the current token
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Current token as a value
    #[must_use]
    pub const fn token(&self) -> Token<'a> {
        Token::new(self.token_type, self.raw, self.line, self.column)
    }

    /// Lowercased tag name of the current tag token
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.token_type
            .is_tag()
            .then_some(&*self.tag_name)
    }

    /// Attributes of the current tag token, in source order
    #[must_use]
    pub fn attributes(&self) -> &[Attribute<'a>] {
        &self.attributes
    }

    /// First attribute of the current tag token
    #[must_use]
    pub fn first_attr(&self) -> Option<&Attribute<'a>> {
        self.attributes.first()
    }

    /// Value of the first attribute named `key` (lowercase)
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .map(|attribute| &*attribute.value)
    }

    /// Exact source text of the current token
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// Decoded text of the current token
    ///
    /// For text tokens, line endings are normalised to `\n` and character
    /// references are resolved (except inside raw-text elements like
    /// `<STYLE>`). For comments and doctypes this is the body. Tags have no
    /// text.
    #[must_use]
    pub fn text(&self) -> Cow<'a, str> {
        match self.token_type {
            TokenType::Text => {
                let normalized = normalize_newlines(self.raw);
                if self.text_is_raw {
                    return normalized;
                }
                match normalized {
                    Cow::Borrowed(text) => entities::decode_entities(text),
                    Cow::Owned(text) => Cow::Owned(entities::decode_entities(&text).into_owned()),
                }
            }
            TokenType::Comment | TokenType::Doctype => Cow::Borrowed(self.data),
            _ => Cow::Borrowed(""),
        }
    }

    /// Error state after an [`TokenType::Error`] token
    #[must_use]
    pub const fn err(&self) -> Option<&TokenizerError> {
        self.err.as_ref()
    }

    /// Get current position in source
    #[must_use]
    pub const fn position(&self) -> usize {
        self.scanner.navigator().position()
    }

    /// Line where the current token starts (1-based)
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Column where the current token starts (1-based)
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Get all tokens as vector for batch processing
    ///
    /// # Errors
    ///
    /// Returns the tokenizer error if tokenization stops for any reason other
    /// than end of input.
    pub fn tokenize_all(&mut self) -> Result<Vec<Token<'a>>, TokenizerError> {
        let mut tokens = Vec::new();
        loop {
            match self.next() {
                TokenType::Error => match self.err.clone() {
                    Some(TokenizerError::Eof) | None => return Ok(tokens),
                    Some(error) => return Err(error),
                },
                _ => tokens.push(self.token()),
            }
        }
    }
}

/// Convert `\r\n` and lone `\r` to `\n`
fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}
