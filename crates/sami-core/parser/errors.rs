//! Parser error types for SAMI cue parsing
//!
//! The read path is all-or-nothing: malformed but tokenizable markup is
//! tolerated silently, and the only hard failure is a tokenizer error other
//! than end of input.

use alloc::string::{String, ToString};

use thiserror::Error;

use crate::tokenizer::TokenizerError;

/// Primary parse error type for SAMI documents
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tokenizer stopped on something other than end of input
    #[error("token stream error at line {line}, column {column}: {reason}")]
    TokenStream {
        line: usize,
        column: usize,
        reason: String,
    },
}

impl ParseError {
    /// Build a token stream error from the tokenizer's failure
    #[must_use]
    pub fn token_stream(error: &TokenizerError, line: usize, column: usize) -> Self {
        Self::TokenStream {
            line,
            column,
            reason: error.to_string(),
        }
    }

    /// Line number where the error occurred
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::TokenStream { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_stream_message() {
        let cause = TokenizerError::TokenTooLong {
            limit: 16,
            line: 3,
            column: 7,
        };
        let error = ParseError::token_stream(&cause, 3, 7);
        assert_eq!(error.line(), 3);
        let message = error.to_string();
        assert!(message.contains("line 3, column 7"));
        assert!(message.contains("16-byte limit"));
    }
}
