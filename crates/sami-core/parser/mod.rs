//! SAMI cue parser
//!
//! A token-driven state machine that turns a SAMI document into a
//! [`CueList`]. Cues are delimited by `SYNC` markers and a cue's end time is
//! the start time of the next marker, so the parser keeps one in-flight entry
//! and flushes it one step behind, when the next boundary arrives. The entry
//! open at end of input is never flushed.
//!
//! # Example
//!
//! ```rust
//! use sami_core::parser::SamiParser;
//!
//! let source = "<SYNC Start=1000><P Class=ENCC>Hello\n\
//!               <SYNC Start=4000><P Class=ENCC>&nbsp;";
//! let cues = SamiParser::new(source).parse()?;
//!
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues.entries()[0].text, "Hello\n");
//! # Ok::<(), sami_core::parser::ParseError>(())
//! ```

use alloc::{borrow::Cow, string::String};
use core::fmt;
use std::time::Duration;

use log::{debug, trace, warn};

use crate::{
    model::{CueEntry, CueList},
    tokenizer::{MarkupTokenizer, TokenType, TokenizerConfig},
    utils::{compose_duration, parse_millis},
};

pub mod errors;

pub use errors::ParseError;

/// Inline style tags that are re-emitted into cue text
pub const INLINE_STYLE_TAGS: &[&str] = &["i", "b"];

/// Raw-text marker that closes a cue
const NBSP_MARKER: &str = "&nbsp";

/// Position of the parser relative to the current cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParserState {
    /// Waiting for a sync marker to open a cue
    #[default]
    Init,
    /// A cue is open, no text captured yet
    SyncStart,
    /// Caption text captured
    Text,
    /// The closing `&nbsp;` marker was seen
    SyncEnd,
    /// Terminal state; no transition enters it
    ForceQuit,
}

impl ParserState {
    /// Whether text tokens are captured in this state
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        matches!(self, Self::Init | Self::SyncStart)
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::SyncStart => "sync-start",
            Self::Text => "text",
            Self::SyncEnd => "sync-end",
            Self::ForceQuit => "force-quit",
        };
        f.write_str(name)
    }
}

/// Parser configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Limits applied to the underlying tokenizer
    pub tokenizer: TokenizerConfig,
}

impl ParserConfig {
    /// Config with a per-token size limit
    #[must_use]
    pub const fn with_max_token_len(limit: usize) -> Self {
        Self {
            tokenizer: TokenizerConfig::with_max_token_len(limit),
        }
    }
}

/// SAMI cue parser over a single document
#[derive(Debug)]
pub struct SamiParser<'a> {
    /// Tokenizer over the trimmed source
    tokenizer: MarkupTokenizer<'a>,
    /// Current state machine position
    state: ParserState,
    /// Entry under construction
    pending: Option<CueEntry>,
    /// Start of the most recently opened cue
    previous_start: Duration,
    /// Finalized entries
    cues: CueList,
}

impl<'a> SamiParser<'a> {
    /// Create parser with default configuration
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, &ParserConfig::default())
    }

    /// Create parser with explicit configuration
    #[must_use]
    pub fn with_config(source: &'a str, config: &ParserConfig) -> Self {
        Self {
            tokenizer: MarkupTokenizer::with_config(source.trim(), config.tokenizer.clone()),
            state: ParserState::Init,
            pending: Some(CueEntry::default()),
            previous_start: Duration::ZERO,
            cues: CueList::new(),
        }
    }

    /// Current state machine position
    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// Run the state machine to completion
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TokenStream`] if the tokenizer fails for any
    /// reason other than end of input. No partial list is returned.
    pub fn parse(mut self) -> Result<CueList, ParseError> {
        loop {
            match self.tokenizer.next() {
                TokenType::Error => {
                    if let Some(error) = self.tokenizer.err().filter(|e| !e.is_eof()) {
                        return Err(ParseError::token_stream(
                            error,
                            self.tokenizer.line(),
                            self.tokenizer.column(),
                        ));
                    }
                    break;
                }
                TokenType::StartTag => self.handle_start_tag(),
                TokenType::EndTag => self.handle_end_tag(),
                TokenType::Text => self.handle_text(),
                TokenType::SelfClosingTag | TokenType::Comment | TokenType::Doctype => {}
            }
        }

        if self.state != ParserState::Init {
            debug!(
                "leaving last cue unflushed in state {} at end of input",
                self.state
            );
        }
        debug!("parsed {} cue entries", self.cues.len());
        Ok(self.cues)
    }

    fn handle_start_tag(&mut self) {
        let Some(name) = self.tokenizer.tag_name() else {
            return;
        };

        if name == "sync" {
            if let Some(value) = self.tokenizer.attr("start") {
                let at = sync_time(value);
                self.handle_sync(at);
            }
            return;
        }

        if INLINE_STYLE_TAGS.contains(&name) {
            let fragment = format!("<{name}>");
            self.append(&fragment);
        }
    }

    fn handle_end_tag(&mut self) {
        if let Some(name) = self.tokenizer.tag_name() {
            if INLINE_STYLE_TAGS.contains(&name) {
                let fragment = format!("</{name}>");
                self.append(&fragment);
            }
        }
    }

    /// Apply a sync boundary at `at`
    fn handle_sync(&mut self, at: Duration) {
        if self.state == ParserState::SyncEnd {
            self.flush(self.previous_start);
        }

        match self.state {
            ParserState::Init => {
                if let Some(entry) = self.pending.as_mut() {
                    entry.start = at;
                }
                self.previous_start = at;
                self.transition(ParserState::SyncStart);
            }
            ParserState::SyncStart | ParserState::Text => self.flush(at),
            ParserState::SyncEnd | ParserState::ForceQuit => {}
        }
    }

    fn handle_text(&mut self) {
        if !self.state.accepts_text() {
            return;
        }

        let raw = self.tokenizer.raw();
        let to_sync_end = raw.contains(NBSP_MARKER);
        let text: Cow<'_, str> = if to_sync_end {
            Cow::Borrowed(raw)
        } else {
            self.tokenizer.text()
        };

        if is_blank(&text) {
            return;
        }

        self.append(&text);
        self.transition(if to_sync_end {
            ParserState::SyncEnd
        } else {
            ParserState::Text
        });
    }

    /// Finalize the in-flight entry and open a fresh one
    fn flush(&mut self, end: Duration) {
        let mut entry = self.pending.take().unwrap_or_default();
        entry.end = end;
        debug!("cue #{}: {entry}", self.cues.len());
        self.cues.push(entry);
        self.pending = Some(CueEntry::default());
        self.transition(ParserState::Init);
    }

    fn append(&mut self, fragment: &str) {
        self.pending
            .get_or_insert_with(CueEntry::default)
            .text
            .push_str(fragment);
    }

    fn transition(&mut self, next: ParserState) {
        if self.state != next {
            trace!("{} -> {}", self.state, next);
            self.state = next;
        }
    }
}

/// Parse a `Start` value, tolerating garbage as zero
fn sync_time(value: &str) -> Duration {
    let millis = parse_millis(value).unwrap_or_else(|error| {
        warn!("treating sync start {value:?} as 0 ms: {error}");
        0
    });
    compose_duration(0, 0, 0, millis)
}

/// Whether a text fragment is empty once comments and whitespace are ignored
fn is_blank(text: &str) -> bool {
    let stripped = strip_comments(text);
    stripped.replace('\n', " ").trim().is_empty()
}

/// Remove every comment (`<!-- ... -->` or bogus `<?...>`) from `input`
///
/// Borrows when the input has no comments or cannot be tokenized.
#[must_use]
pub fn strip_comments(input: &str) -> Cow<'_, str> {
    if !input.contains('<') {
        return Cow::Borrowed(input);
    }

    let mut tokenizer = MarkupTokenizer::new(input);
    let mut out = String::with_capacity(input.len());
    let mut found = false;
    loop {
        match tokenizer.next() {
            TokenType::Error => break,
            TokenType::Comment => found = true,
            _ => out.push_str(tokenizer.raw()),
        }
    }

    if found {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(input)
    }
}

/// Parse a SAMI document into cues with default configuration
///
/// # Errors
///
/// See [`SamiParser::parse`].
pub fn parse_cues(source: &str) -> Result<CueList, ParseError> {
    SamiParser::new(source).parse()
}

#[cfg(test)]
mod tests;
