//! Token definitions for markup tokenization
//!
//! Tokens reference the original source text via lifetime parameters. Tag
//! names and attribute keys are lowercased on the way in, so they are owned
//! only when the source spelled them with uppercase letters.

use alloc::borrow::Cow;
use core::fmt;

/// Token type discriminant
///
/// Mirrors the event kinds of a generic HTML tokenizer. `Error` covers both
/// the benign end of input and genuine failures; the tokenizer's `err()`
/// tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// End of input or tokenizer failure
    Error,

    /// Character data between markup constructs
    Text,

    /// Opening tag like `<SYNC Start=1000>`
    StartTag,

    /// Closing tag like `</i>`
    EndTag,

    /// Tag closed with `/>`, like `<br/>`
    SelfClosingTag,

    /// `<!-- ... -->` or a bogus comment such as `<?xml ...>`
    Comment,

    /// `<!DOCTYPE ...>` declaration
    Doctype,
}

impl TokenType {
    /// Check if this token carries a tag name and attributes
    #[must_use]
    pub const fn is_tag(self) -> bool {
        matches!(self, Self::StartTag | Self::EndTag | Self::SelfClosingTag)
    }

    /// Get string representation for display
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Text => "text",
            Self::StartTag => "start-tag",
            Self::EndTag => "end-tag",
            Self::SelfClosingTag => "self-closing-tag",
            Self::Comment => "comment",
            Self::Doctype => "doctype",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute of a tag token
///
/// `key` is lowercased. `value` has character entities decoded; it is empty
/// for bare attributes like `<input disabled>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Lowercased attribute name
    pub key: Cow<'a, str>,

    /// Entity-decoded attribute value
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    /// Create new attribute
    #[must_use]
    pub const fn new(key: Cow<'a, str>, value: Cow<'a, str>) -> Self {
        Self { key, value }
    }
}

/// Token produced by the markup tokenizer with zero-copy raw span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token type discriminant
    pub token_type: TokenType,

    /// Exact source text of the token
    pub raw: &'a str,

    /// Line number where token starts (1-based)
    pub line: usize,

    /// Column number where token starts (1-based)
    pub column: usize,
}

impl<'a> Token<'a> {
    /// Create new token with full location information
    #[must_use]
    pub const fn new(token_type: TokenType, raw: &'a str, line: usize, column: usize) -> Self {
        Self {
            token_type,
            raw,
            line,
            column,
        }
    }

    /// Check if token is empty (only the end-of-input token is)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{} '{}'",
            self.token_type, self.line, self.column, self.raw
        )
    }
}
