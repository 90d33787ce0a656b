//! Subtitle format facade
//!
//! Pairs the read path (parser) and write path (document builder plus
//! renderer) behind one trait so callers handle files by extension without
//! knowing which half does what.

use alloc::{string::String, vec::Vec};
use core::fmt;
use std::io::{Read, Write};

use crate::{model::CueList, utils::CoreError, Result};

pub mod sami;

pub use sami::{build_document, SamiFormat};

/// Metadata about a subtitle format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format name (e.g., "SAMI")
    pub name: String,
    /// File extensions supported by this format, without the dot
    pub extensions: Vec<String>,
    /// MIME type for this format
    pub mime_type: String,
    /// Brief description of the format
    pub description: String,
    /// Whether this format supports styling
    pub supports_styling: bool,
}

/// Reader and writer for one subtitle format
pub trait SubtitleFormat: fmt::Debug + Send + Sync {
    /// Get information about this format
    fn info(&self) -> &FormatInfo;

    /// Check if this format handles the given file extension
    fn can_handle(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.info()
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Parse a complete document
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the document cannot be tokenized.
    fn read(&self, content: &str) -> Result<CueList>;

    /// Parse a complete document from bytes, skipping a UTF-8 byte order mark
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Utf8Error`] for invalid UTF-8, otherwise as
    /// [`Self::read`].
    fn read_bytes(&self, bytes: &[u8]) -> Result<CueList> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let content = core::str::from_utf8(bytes)?;
        self.read(content)
    }

    /// Read a complete document from a reader
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if reading fails, otherwise as
    /// [`Self::read_bytes`].
    fn read_from_reader(&self, reader: &mut dyn Read) -> Result<CueList> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        self.read_bytes(&buffer)
    }

    /// Serialize cues into a document
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Render`] if serialization fails.
    fn write(&self, cues: &CueList) -> Result<String>;

    /// Serialize cues into a writer
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if writing fails, otherwise as
    /// [`Self::write`].
    fn write_to_writer(&self, cues: &CueList, writer: &mut dyn Write) -> Result<()> {
        let content = self.write(cues)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| CoreError::Io(format!("Failed to write output: {e}")))
    }
}
