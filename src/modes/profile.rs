//! Rhythmic mode profiles — the stylistic targets a signature is scored against.
//!
//! Three canonical modes ship with the engine:
//!
//! | Mode       | Tempo    | Rhythm     | Tone      | Breath    |
//! |------------|----------|------------|-----------|-----------|
//! | Reflective | slow     | legato     | neutral   | long      |
//! | Active     | fast     | staccato   | assertive | short     |
//! | Uncertain  | variable | syncopated | doubtful  | irregular |
//!
//! Further profiles are produced by blending two of these
//! (see [`super::blender`]).

use serde::{Deserialize, Serialize};

// ============================================================================
// Categorical fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTempo {
    Slow,
    Fast,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeRhythm {
    Legato,
    Staccato,
    Syncopated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeTone {
    Neutral,
    Assertive,
    Doubtful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeBreath {
    Long,
    Short,
    Irregular,
}

// ============================================================================
// Profile
// ============================================================================

/// A rhythmic mode profile. Immutable value object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmicModeProfile {
    pub tempo: ModeTempo,
    pub rhythm: ModeRhythm,
    pub tone: ModeTone,
    pub breath: ModeBreath,
    /// Free-text image describing the mode.
    pub metaphor: String,
    /// Longest sentence (characters) the mode tolerates.
    pub max_sentence_length: u32,
    /// Whether the mode favours chaining clauses with conjunctions.
    pub prefer_conjunctions: bool,
    pub allow_questions: bool,
    /// Share of modal words ("maybe", "perhaps") the mode targets, in `[0, 1]`.
    pub modal_words_ratio: f64,
}

// ============================================================================
// Canonical modes
// ============================================================================

/// The three canonical rhythmic modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseMode {
    Reflective,
    Active,
    Uncertain,
}

impl BaseMode {
    /// All canonical modes in catalog order.
    pub const ALL: [BaseMode; 3] = [Self::Reflective, Self::Active, Self::Uncertain];

    /// Catalog key for this mode.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Reflective => "reflective",
            Self::Active => "active",
            Self::Uncertain => "uncertain",
        }
    }

    /// Parse a catalog key.
    pub fn from_key(key: &str) -> Option<BaseMode> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Whether `key` names one of the canonical modes.
    pub fn is_canonical(key: &str) -> bool {
        Self::from_key(key).is_some()
    }

    /// Build the fixed profile for this mode.
    pub fn profile(&self) -> RhythmicModeProfile {
        match self {
            Self::Reflective => RhythmicModeProfile {
                tempo: ModeTempo::Slow,
                rhythm: ModeRhythm::Legato,
                tone: ModeTone::Neutral,
                breath: ModeBreath::Long,
                metaphor: "a slow river".into(),
                max_sentence_length: 150,
                prefer_conjunctions: true,
                allow_questions: false,
                modal_words_ratio: 0.1,
            },
            Self::Active => RhythmicModeProfile {
                tempo: ModeTempo::Fast,
                rhythm: ModeRhythm::Staccato,
                tone: ModeTone::Assertive,
                breath: ModeBreath::Short,
                metaphor: "a drumbeat".into(),
                max_sentence_length: 40,
                prefer_conjunctions: false,
                allow_questions: false,
                modal_words_ratio: 0.0,
            },
            Self::Uncertain => RhythmicModeProfile {
                tempo: ModeTempo::Variable,
                rhythm: ModeRhythm::Syncopated,
                tone: ModeTone::Doubtful,
                breath: ModeBreath::Irregular,
                metaphor: "fog over water".into(),
                max_sentence_length: 80,
                prefer_conjunctions: true,
                allow_questions: true,
                modal_words_ratio: 0.3,
            },
        }
    }
}

impl std::fmt::Display for BaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_values_are_fixed() {
        let r = BaseMode::Reflective.profile();
        assert_eq!(r.tempo, ModeTempo::Slow);
        assert_eq!(r.rhythm, ModeRhythm::Legato);
        assert_eq!(r.tone, ModeTone::Neutral);
        assert_eq!(r.breath, ModeBreath::Long);
        assert_eq!(r.max_sentence_length, 150);
        assert!(r.prefer_conjunctions);
        assert!(!r.allow_questions);
        assert_eq!(r.modal_words_ratio, 0.1);

        let a = BaseMode::Active.profile();
        assert_eq!(a.tempo, ModeTempo::Fast);
        assert_eq!(a.rhythm, ModeRhythm::Staccato);
        assert_eq!(a.tone, ModeTone::Assertive);
        assert_eq!(a.breath, ModeBreath::Short);
        assert_eq!(a.max_sentence_length, 40);
        assert!(!a.prefer_conjunctions);
        assert!(!a.allow_questions);
        assert_eq!(a.modal_words_ratio, 0.0);

        let u = BaseMode::Uncertain.profile();
        assert_eq!(u.tempo, ModeTempo::Variable);
        assert_eq!(u.rhythm, ModeRhythm::Syncopated);
        assert_eq!(u.tone, ModeTone::Doubtful);
        assert_eq!(u.breath, ModeBreath::Irregular);
        assert_eq!(u.max_sentence_length, 80);
        assert!(u.prefer_conjunctions);
        assert!(u.allow_questions);
        assert_eq!(u.modal_words_ratio, 0.3);
    }

    #[test]
    fn test_key_roundtrip() {
        for mode in BaseMode::ALL {
            assert_eq!(BaseMode::from_key(mode.key()), Some(mode));
            assert_eq!(mode.to_string(), mode.key());
        }
        assert_eq!(BaseMode::from_key("lyrical"), None);
        assert!(!BaseMode::is_canonical("Reflective"));
    }

    #[test]
    fn test_profile_yaml_uses_snake_case() {
        let yaml = serde_yaml::to_string(&BaseMode::Uncertain.profile()).unwrap();
        assert!(yaml.contains("tempo: variable"));
        assert!(yaml.contains("rhythm: syncopated"));
        assert!(yaml.contains("breath: irregular"));
    }
}
