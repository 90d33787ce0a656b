//! # SAMI Core
//!
//! Reader and writer for SAMI (Synchronized Accessible Media Interchange)
//! captions. The read path runs a token-driven state machine over the
//! document's `SYNC` markers; the write path builds a markup tree and renders
//! it with a serializer that never writes closing tags and leaves SAMI's
//! literal sequences (`&nbsp`, re-emitted `<i>`/`<b>`) unescaped.
//!
//! ## Features
//!
//! - **Zero-copy tokenizer**: raw token spans borrow from the input
//! - **Strict failure model**: a document either parses completely or not at all
//! - **Lossless inline styles**: `<i>` and `<b>` survive a read/write cycle
//! - **Thread-safe**: parsing and rendering share no state
//!
//! ## Quick Start
//!
//! ```rust
//! let source = r#"
//! <SAMI>
//! <BODY>
//! <SYNC Start=1000><P Class=ENCC>Hello
//! <SYNC Start=4000><P Class=ENCC>&nbsp;
//! </BODY>
//! </SAMI>
//! "#;
//!
//! let cues = sami_core::parse(source)?;
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues.entries()[0].text.trim(), "Hello");
//!
//! let written = sami_core::write(&cues)?;
//! assert_eq!(
//!     written,
//!     "<SYNC Start=1000><P Class=ENCC>Hello\n<SYNC Start=4000><P Class=ENCC>&nbsp;"
//! );
//! # Ok::<(), sami_core::CoreError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod format;
pub mod model;
pub mod parser;
pub mod render;
pub mod tokenizer;
pub mod utils;

pub use format::{FormatInfo, SamiFormat, SubtitleFormat};
pub use model::{CueEntry, CueList};
pub use parser::{ParseError, ParserConfig, ParserState, SamiParser};
pub use render::{render, render_to_string, MarkupNode, NodeKind, RenderError};
pub use tokenizer::{MarkupTokenizer, TokenType, TokenizerConfig, TokenizerError};
pub use utils::CoreError;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;

/// Parse a SAMI document with default limits
///
/// # Errors
///
/// Returns [`CoreError::Parse`] if the tokenizer fails before end of input.
pub fn parse(source: &str) -> Result<CueList> {
    SamiFormat::new().read(source)
}

/// Write cues as a SAMI body with default settings
///
/// # Errors
///
/// Returns [`CoreError::Render`] if serialization fails.
pub fn write(cues: &CueList) -> Result<String> {
    SamiFormat::new().write(cues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn public_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CueList>();
        assert_send_sync::<MarkupNode>();
        assert_send_sync::<SamiFormat>();
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn parse_then_write() {
        let cues = parse("<SYNC Start=0><P Class=ENCC><i>Hi</i><SYNC Start=500><P Class=ENCC>&nbsp;")
            .unwrap();
        let written = write(&cues).unwrap();
        assert_eq!(
            written,
            "<SYNC Start=0><P Class=ENCC><i>Hi</i>\n<SYNC Start=500><P Class=ENCC>&nbsp;"
        );
    }
}
