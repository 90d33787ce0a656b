//! Core error type for SAMI operations
//!
//! Provides the main `CoreError` enum that wraps the error types of the
//! parser and renderer halves. Designed for easy error propagation and
//! conversion at the crate boundary.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Provide detailed context for debugging and user feedback
//! - Both halves are all-or-nothing: an error carries no partial result
//!
//! # Examples
//!
//! ```rust
//! use sami_core::utils::errors::CoreError;
//!
//! let err = CoreError::invalid_time("12ab", "not a millisecond count");
//! assert!(err.is_recoverable());
//! assert!(err.to_string().contains("12ab"));
//! ```

use core::fmt;

use thiserror::Error;

use crate::parser::ParseError;
use crate::render::RenderError;

/// Main error type for SAMI core operations
///
/// Wraps the error types of the read and write paths to provide a unified
/// error handling interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Read path failure (token stream error)
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Write path failure (unrenderable node or sink error)
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Time value parsing errors
    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    /// UTF-8 encoding errors in byte input
    #[error("UTF-8 encoding error at position {position}: {message}")]
    Utf8Error { position: usize, message: String },

    /// File or stream I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl CoreError {
    /// Create time error from an unparsable value
    pub fn invalid_time<T: fmt::Display>(value: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{value}': {reason}"))
    }

    /// Check if error is recoverable
    ///
    /// Input and sink failures can be fixed by the caller supplying different
    /// data or a working writer. An error node in a rendered tree means the
    /// tree itself is malformed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Parse(_)
            | Self::Render(RenderError::Io(_))
            | Self::InvalidTime(_)
            | Self::Utf8Error { .. }
            | Self::Io(_) => true,
            Self::Render(RenderError::ErrorNode) => false,
        }
    }
}

/// Convert from standard I/O errors
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Convert from `core::str::Utf8Error`
impl From<core::str::Utf8Error> for CoreError {
    fn from(err: core::str::Utf8Error) -> Self {
        Self::Utf8Error {
            position: err.valid_up_to(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
