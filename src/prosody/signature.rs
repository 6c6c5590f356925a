//! Prosodic signature — the coarse pacing descriptor derived from one text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentence pacing: short sentences read fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureTempo {
    Fast,
    Slow,
}

/// Sentence density: many sentences read staccato.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureRhythm {
    Staccato,
    Legato,
}

/// Pause density: fewer commas than sentences reads as short breath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureBreath {
    Short,
    Long,
}

/// Whether the text asks anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureTone {
    Question,
    Statement,
}

/// Prosodic signature of a single text.
///
/// Immutable once measured; see [`super::extractor::measure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProsodicSignature {
    pub tempo: SignatureTempo,
    pub rhythm: SignatureRhythm,
    pub breath: SignatureBreath,
    pub tone: SignatureTone,
}

impl fmt::Display for SignatureTempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Slow => write!(f, "slow"),
        }
    }
}

impl fmt::Display for SignatureRhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staccato => write!(f, "staccato"),
            Self::Legato => write!(f, "legato"),
        }
    }
}

impl fmt::Display for SignatureBreath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "short"),
            Self::Long => write!(f, "long"),
        }
    }
}

impl fmt::Display for SignatureTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question => write!(f, "question"),
            Self::Statement => write!(f, "statement"),
        }
    }
}

impl fmt::Display for ProsodicSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.tempo, self.rhythm, self.breath, self.tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_fields() {
        let sig = ProsodicSignature {
            tempo: SignatureTempo::Fast,
            rhythm: SignatureRhythm::Legato,
            breath: SignatureBreath::Short,
            tone: SignatureTone::Question,
        };
        assert_eq!(sig.to_string(), "fast/legato/short/question");
    }

    #[test]
    fn test_serde_uses_snake_case_labels() {
        let sig = ProsodicSignature {
            tempo: SignatureTempo::Slow,
            rhythm: SignatureRhythm::Staccato,
            breath: SignatureBreath::Long,
            tone: SignatureTone::Statement,
        };
        let json = serde_json::to_value(sig).unwrap();
        assert_eq!(json["tempo"], "slow");
        assert_eq!(json["rhythm"], "staccato");
        assert_eq!(json["breath"], "long");
        assert_eq!(json["tone"], "statement");
    }
}
