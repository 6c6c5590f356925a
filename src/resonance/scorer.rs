//! Resonance scoring — how well a signature fits a mode profile.
//!
//! Scoring starts at `1.0` and subtracts a fixed weight for every penalty
//! rule that fires, floored at `0.0`:
//!
//! | Rule                 | Profile       | Signature       | Weight |
//! |----------------------|---------------|-----------------|--------|
//! | `FastNeedsShortBreath` | tempo fast    | breath ≠ short  | 0.20 |
//! | `LegatoNeedsLongBreath`| rhythm legato | breath = short  | 0.20 |
//! | `AssertiveNeedsStatement` | tone assertive | tone ≠ statement | 0.20 |
//! | `SlowAgainstFast`    | tempo slow    | tempo fast      | 0.15 |
//! | `StaccatoNeedsStaccato` | rhythm staccato | rhythm ≠ staccato | 0.15 |
//! | `DoubtfulNeedsQuestion` | tone doubtful | tone ≠ question | 0.10 |

use serde::{Deserialize, Serialize};

use crate::modes::profile::{ModeRhythm, ModeTempo, ModeTone, RhythmicModeProfile};
use crate::prosody::signature::{
    ProsodicSignature, SignatureBreath, SignatureRhythm, SignatureTempo, SignatureTone,
};

/// One penalty rule of the resonance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    FastNeedsShortBreath,
    LegatoNeedsLongBreath,
    AssertiveNeedsStatement,
    SlowAgainstFast,
    StaccatoNeedsStaccato,
    DoubtfulNeedsQuestion,
}

impl Penalty {
    pub const ALL: [Penalty; 6] = [
        Self::FastNeedsShortBreath,
        Self::LegatoNeedsLongBreath,
        Self::AssertiveNeedsStatement,
        Self::SlowAgainstFast,
        Self::StaccatoNeedsStaccato,
        Self::DoubtfulNeedsQuestion,
    ];

    /// Amount subtracted from the score when the rule fires.
    pub fn weight(&self) -> f64 {
        match self {
            Self::FastNeedsShortBreath
            | Self::LegatoNeedsLongBreath
            | Self::AssertiveNeedsStatement => 0.20,
            Self::SlowAgainstFast | Self::StaccatoNeedsStaccato => 0.15,
            Self::DoubtfulNeedsQuestion => 0.10,
        }
    }

    /// Whether the rule fires for this pairing.
    pub fn applies(&self, sig: &ProsodicSignature, profile: &RhythmicModeProfile) -> bool {
        match self {
            Self::FastNeedsShortBreath => {
                profile.tempo == ModeTempo::Fast && sig.breath != SignatureBreath::Short
            }
            Self::LegatoNeedsLongBreath => {
                profile.rhythm == ModeRhythm::Legato && sig.breath == SignatureBreath::Short
            }
            Self::AssertiveNeedsStatement => {
                profile.tone == ModeTone::Assertive && sig.tone != SignatureTone::Statement
            }
            Self::SlowAgainstFast => {
                profile.tempo == ModeTempo::Slow && sig.tempo == SignatureTempo::Fast
            }
            Self::StaccatoNeedsStaccato => {
                profile.rhythm == ModeRhythm::Staccato && sig.rhythm != SignatureRhythm::Staccato
            }
            Self::DoubtfulNeedsQuestion => {
                profile.tone == ModeTone::Doubtful && sig.tone != SignatureTone::Question
            }
        }
    }
}

/// Rules that fire for this pairing, in table order.
pub fn penalties(sig: &ProsodicSignature, profile: &RhythmicModeProfile) -> Vec<Penalty> {
    Penalty::ALL
        .into_iter()
        .filter(|p| p.applies(sig, profile))
        .collect()
}

/// Resonance of `sig` against `profile`, in `[0, 1]`.
pub fn score(sig: &ProsodicSignature, profile: &RhythmicModeProfile) -> f64 {
    let total: f64 = penalties(sig, profile).iter().map(Penalty::weight).sum();
    (1.0 - total).clamp(0.0, 1.0)
}

/// Stateless scorer handle, for callers that prefer a value to a free function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResonanceScorer;

impl ResonanceScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, sig: &ProsodicSignature, profile: &RhythmicModeProfile) -> f64 {
        score(sig, profile)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::profile::BaseMode;
    use crate::prosody::extractor::measure;

    const EPS: f64 = 1e-9;

    fn all_signatures() -> Vec<ProsodicSignature> {
        let mut out = Vec::new();
        for tempo in [SignatureTempo::Fast, SignatureTempo::Slow] {
            for rhythm in [SignatureRhythm::Staccato, SignatureRhythm::Legato] {
                for breath in [SignatureBreath::Short, SignatureBreath::Long] {
                    for tone in [SignatureTone::Question, SignatureTone::Statement] {
                        out.push(ProsodicSignature { tempo, rhythm, breath, tone });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_worked_example_against_active() {
        let sig = measure("Hi. Is this working? Great.");
        let active = BaseMode::Active.profile();
        let fired = penalties(&sig, &active);
        assert_eq!(
            fired,
            vec![Penalty::AssertiveNeedsStatement, Penalty::StaccatoNeedsStaccato]
        );
        assert!((score(&sig, &active) - 0.65).abs() < EPS);
    }

    #[test]
    fn test_score_always_in_unit_interval() {
        for sig in all_signatures() {
            for mode in BaseMode::ALL {
                let s = score(&sig, &mode.profile());
                assert!((0.0..=1.0).contains(&s), "{} vs {}: {}", sig, mode, s);
            }
        }
    }

    #[test]
    fn test_perfect_fit_scores_one() {
        let sig = ProsodicSignature {
            tempo: SignatureTempo::Fast,
            rhythm: SignatureRhythm::Staccato,
            breath: SignatureBreath::Short,
            tone: SignatureTone::Statement,
        };
        assert_eq!(score(&sig, &BaseMode::Active.profile()), 1.0);
        assert!(penalties(&sig, &BaseMode::Active.profile()).is_empty());
    }

    #[test]
    fn test_reflective_penalizes_fast_short_text() {
        let sig = ProsodicSignature {
            tempo: SignatureTempo::Fast,
            rhythm: SignatureRhythm::Legato,
            breath: SignatureBreath::Short,
            tone: SignatureTone::Statement,
        };
        // legato + short breath (0.20) and slow profile vs fast text (0.15)
        assert!((score(&sig, &BaseMode::Reflective.profile()) - 0.65).abs() < EPS);
    }

    #[test]
    fn test_uncertain_only_cares_about_questions() {
        let base = ProsodicSignature {
            tempo: SignatureTempo::Slow,
            rhythm: SignatureRhythm::Legato,
            breath: SignatureBreath::Long,
            tone: SignatureTone::Statement,
        };
        let uncertain = BaseMode::Uncertain.profile();
        assert!((score(&base, &uncertain) - 0.9).abs() < EPS);
        let asking = ProsodicSignature { tone: SignatureTone::Question, ..base };
        assert_eq!(score(&asking, &uncertain), 1.0);
    }

    #[test]
    fn test_every_rule_fires_against_some_signature() {
        for penalty in Penalty::ALL {
            let fired = all_signatures().iter().any(|sig| {
                BaseMode::ALL
                    .iter()
                    .any(|m| penalties(sig, &m.profile()).contains(&penalty))
            });
            assert!(fired, "{:?} never fires", penalty);
        }
    }

    #[test]
    fn test_scorer_handle_matches_free_function() {
        let sig = measure("Perhaps. Or perhaps not?");
        let p = BaseMode::Uncertain.profile();
        assert_eq!(ResonanceScorer::new().score(&sig, &p), score(&sig, &p));
    }
}
