/*!
 * Caption and token value types shared by the tagger, the resource loaders
 * and the alignment engine.
 *
 * - `tagger`: turns caption text into `Token` sequences
 * - `vocabulary`: distinct lowercase surface forms of a tagged stream
 */

use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::subtitle_processor::SubtitleEntry;

pub mod tagger;
pub mod vocabulary;

pub use self::tagger::{RuleTagger, Tagger};
pub use self::vocabulary::Vocabulary;

/// Universal part-of-speech category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    /// Punctuation and symbols never take part in alignment
    pub fn is_punctuation_or_symbol(self) -> bool {
        matches!(self, Self::Punct | Self::Sym)
    }
}

/// A single tagged token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appears in the caption
    pub surface: String,

    /// Part-of-speech category
    pub pos: PartOfSpeech,
}

impl Token {
    pub fn new(surface: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            surface: surface.into(),
            pos,
        }
    }

    /// Lowercased surface form used for every lookup
    pub fn lowercase(&self) -> String {
        self.surface.to_lowercase()
    }

    /// Whether the token can appear on either side of an alignment
    pub fn is_alignable(&self) -> bool {
        !self.pos.is_punctuation_or_symbol()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.surface)
    }
}

/// A source token together with the destination tokens assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedToken {
    /// The source token
    pub token: Token,

    /// Destination tokens in assignment order
    pub aligned: Vec<Token>,
}

impl AlignedToken {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            aligned: Vec::new(),
        }
    }

    /// Whether a destination word (already lowercased) was assigned here before
    pub fn has_aligned(&self, lowercase_surface: &str) -> bool {
        self.aligned
            .iter()
            .any(|t| t.surface.to_lowercase() == lowercase_surface)
    }
}

/// A timed caption line carrying a payload of tokens
#[derive(Debug, Clone, PartialEq)]
pub struct Caption<T> {
    /// Start time in ms
    pub start_ms: u64,

    /// End time in ms (never before `start_ms`)
    pub end_ms: u64,

    /// Ordered caption content
    pub payload: Vec<T>,
}

impl<T> Caption<T> {
    pub fn new(start_ms: u64, end_ms: u64, payload: Vec<T>) -> Self {
        debug_assert!(start_ms <= end_ms, "caption ends before it starts");
        Self {
            start_ms,
            end_ms,
            payload,
        }
    }

    /// Same timing, different payload
    pub fn with_payload<U>(&self, payload: Vec<U>) -> Caption<U> {
        Caption {
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            payload,
        }
    }

    /// Signed temporal intersection with another caption.
    ///
    /// Positive when the intervals intersect, zero when they touch at a shared
    /// endpoint, negative (the gap) when they are disjoint.
    pub fn overlap<U>(&self, other: &Caption<U>) -> i64 {
        overlap(self.start_ms, self.end_ms, other.start_ms, other.end_ms)
    }
}

/// `min(a.end, b.end) - max(a.start, b.start)` on millisecond intervals
pub fn overlap(a_start: u64, a_end: u64, b_start: u64, b_end: u64) -> i64 {
    a_end.min(b_end) as i64 - a_start.max(b_start) as i64
}

/// Tag every loaded subtitle entry, keeping timing and order
pub fn tag_entries<G: Tagger + ?Sized>(
    entries: &[SubtitleEntry],
    tagger: &G,
    progress: Option<&ProgressBar>,
) -> Vec<Caption<Token>> {
    entries
        .iter()
        .map(|entry| {
            let caption = Caption::new(entry.start_time_ms, entry.end_time_ms, tagger.tag(&entry.text));
            if let Some(progress) = progress {
                progress.inc(1);
            }
            caption
        })
        .collect()
}
