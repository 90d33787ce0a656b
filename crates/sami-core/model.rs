//! Cue data model shared by the read and write paths
//!
//! A [`CueList`] is the only thing the parser and the renderer have in
//! common: the parser produces one, the write path consumes one.

use alloc::{string::String, vec::Vec};
use core::{fmt, slice};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::duration_to_millis;

/// Marker SAMI uses for the empty caption that closes a cue
pub const NBSP_PLACEHOLDER: &str = "&nbsp;";

/// One timed caption
///
/// `text` holds the caption body exactly as accumulated by the parser,
/// including re-emitted `<i>`/`<b>` tags and raw `&nbsp` text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CueEntry {
    /// When the caption becomes visible
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub start: Duration,

    /// When the caption stops being visible
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub end: Duration,

    /// Caption body
    pub text: String,
}

impl CueEntry {
    /// Create new cue
    #[must_use]
    pub fn new(start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Check if this entry is only the `&nbsp;` gap marker between captions
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        let trimmed = self.text.trim();
        trimmed == NBSP_PLACEHOLDER || trimmed == "&nbsp"
    }

    /// Visible duration, zero when `end` precedes `start`
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for CueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --> {}: {}",
            duration_to_millis(self.start),
            duration_to_millis(self.end),
            self.text.trim()
        )
    }
}

/// Cues in encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CueList {
    entries: Vec<CueEntry>,
}

impl CueList {
    /// Create empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a cue at the end
    pub fn push(&mut self, entry: CueEntry) {
        self.entries.push(entry);
    }

    /// Number of entries, placeholders included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in order
    pub fn iter(&self) -> slice::Iter<'_, CueEntry> {
        self.entries.iter()
    }

    /// All entries as a slice
    #[must_use]
    pub fn entries(&self) -> &[CueEntry] {
        &self.entries
    }

    /// Entries that carry caption text, skipping `&nbsp;` gap markers
    pub fn captions(&self) -> impl Iterator<Item = &CueEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.is_placeholder())
    }

    /// Take ownership of the entries
    #[must_use]
    pub fn into_inner(self) -> Vec<CueEntry> {
        self.entries
    }
}

impl From<Vec<CueEntry>> for CueList {
    fn from(entries: Vec<CueEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<CueEntry> for CueList {
    fn from_iter<I: IntoIterator<Item = CueEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CueList {
    type Item = CueEntry;
    type IntoIter = alloc::vec::IntoIter<CueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CueList {
    type Item = &'a CueEntry;
    type IntoIter = slice::Iter<'a, CueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Durations travel as integer milliseconds, the unit SAMI itself uses
#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::utils::{compose_duration, duration_to_millis};

    /// Write a duration as whole milliseconds
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration_to_millis(*value))
    }

    /// Read whole milliseconds into a duration
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(|ms| compose_duration(0, 0, 0, ms))
    }
}
