//! Prosody extraction — text → [`ProsodicSignature`].
//!
//! The measurement is deliberately coarse: it only looks at sentence
//! terminators, commas, and question marks.
//!
//! ```text
//! text ─ split('.') ─ trim ─ drop empty ─┬─ mean length  → tempo
//!                                        ├─ count        → rhythm
//!                                        └─ vs commas    → breath
//! text ─ contains('?') ──────────────────── tone
//! ```

use super::signature::{
    ProsodicSignature, SignatureBreath, SignatureRhythm, SignatureTempo, SignatureTone,
};

/// Sentences shorter than this (mean, in characters) read as fast.
pub const FAST_TEMPO_MAX_LEN: f64 = 60.0;

/// More segments than this read as staccato.
pub const STACCATO_MIN_SEGMENTS: usize = 5;

const SENTENCE_TERMINATOR: char = '.';

/// Stateless prosody extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProsodyExtractor;

impl ProsodyExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Measure the prosodic signature of `text`.
    pub fn measure(&self, text: &str) -> ProsodicSignature {
        measure(text)
    }

    /// Trimmed, non-empty sentence segments in order of appearance.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        segments(text)
    }
}

/// Trimmed, non-empty segments of `text` split on `.`.
pub fn segments(text: &str) -> Vec<&str> {
    text.split(SENTENCE_TERMINATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Measure the prosodic signature of `text`.
///
/// Never fails. Empty input yields `fast/legato/long/statement`.
pub fn measure(text: &str) -> ProsodicSignature {
    let segs = segments(text);
    let count = segs.len();

    let avg_len = if count == 0 {
        0.0
    } else {
        let total: usize = segs.iter().map(|s| s.chars().count()).sum();
        total as f64 / count as f64
    };

    let commas = text.chars().filter(|c| *c == ',').count();

    ProsodicSignature {
        tempo: if avg_len < FAST_TEMPO_MAX_LEN {
            SignatureTempo::Fast
        } else {
            SignatureTempo::Slow
        },
        rhythm: if count > STACCATO_MIN_SEGMENTS {
            SignatureRhythm::Staccato
        } else {
            SignatureRhythm::Legato
        },
        breath: if commas < count {
            SignatureBreath::Short
        } else {
            SignatureBreath::Long
        },
        tone: if text.contains('?') {
            SignatureTone::Question
        } else {
            SignatureTone::Statement
        },
    }
}
