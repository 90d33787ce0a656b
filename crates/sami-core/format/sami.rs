//! SAMI format support
//!
//! Reading runs the cue parser. Writing builds one pair of `SYNC` elements
//! per cue, the caption followed by an `&nbsp;` placeholder at the cue's end
//! time, and renders the tree without closing tags.

use alloc::string::{String, ToString};

use log::debug;

use super::{FormatInfo, SubtitleFormat};
use crate::{
    model::{CueList, NBSP_PLACEHOLDER},
    parser::{ParserConfig, SamiParser},
    render::{render_to_string, MarkupNode},
    utils::format_sami_time,
    Result,
};

/// Paragraph element every caption is wrapped in
const CAPTION_PARAGRAPH: &str = "P Class=ENCC";

/// SAMI format handler
#[derive(Debug, Clone)]
pub struct SamiFormat {
    info: FormatInfo,
    config: ParserConfig,
}

impl SamiFormat {
    /// Create a new SAMI format handler with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a SAMI format handler with explicit parser limits
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            info: FormatInfo {
                name: "SAMI".to_string(),
                extensions: vec!["smi".to_string(), "sami".to_string()],
                mime_type: "application/x-sami".to_string(),
                description: "Synchronized Accessible Media Interchange captions".to_string(),
                supports_styling: true,
            },
            config,
        }
    }

    /// Parser limits in use
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl Default for SamiFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleFormat for SamiFormat {
    fn info(&self) -> &FormatInfo {
        &self.info
    }

    fn read(&self, content: &str) -> Result<CueList> {
        let cues = SamiParser::with_config(content, &self.config).parse()?;
        Ok(cues)
    }

    fn write(&self, cues: &CueList) -> Result<String> {
        let document = build_document(cues);
        let rendered = render_to_string(&document)?;
        debug!("rendered {} cues into {} bytes", cues.len(), rendered.len());
        Ok(rendered.trim().to_string())
    }
}

/// Build the node tree the write path renders
///
/// Caption text is trimmed and terminated with a newline.
#[must_use]
pub fn build_document(cues: &CueList) -> MarkupNode {
    let mut document = MarkupNode::document();
    for cue in cues {
        document.append_child(sync_element(
            &format_sami_time(cue.start),
            format!("{}\n", cue.text.trim()),
        ));
        document.append_child(sync_element(
            &format_sami_time(cue.end),
            format!("{NBSP_PLACEHOLDER}\n"),
        ));
    }
    document
}

fn sync_element(start: &str, text: String) -> MarkupNode {
    MarkupNode::element(format!("SYNC Start={start}"))
        .with_child(MarkupNode::element(CAPTION_PARAGRAPH).with_child(MarkupNode::text(text)))
}
