//! Mode blending — hybrid profiles interpolated from two base modes.
//!
//! Numeric fields are convex combinations of the two parents; categorical
//! fields are copied wholesale from whichever parent dominates the ratio.
//!
//! ```text
//! ratio:   0.0 ──────── 0.5 ──────── 1.0
//! dominant:  A  A  A  A  A | B  B  B  B
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

use super::profile::RhythmicModeProfile;
use super::registry::ModeRegistry;

/// Ratio used when the caller does not specify one.
pub const DEFAULT_BLEND_RATIO: f64 = 0.5;

/// A profile produced by blending two base modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridProfile {
    /// Catalog name; defaults to `"{a}_{b}_hybrid"`.
    pub name: String,
    /// Parent keys `[a, b]`.
    pub parents: [String; 2],
    /// Weight of parent `b`.
    pub ratio: f64,
    #[serde(flatten)]
    pub profile: RhythmicModeProfile,
}

/// Builds hybrid profiles and owns the mutable custom-mode catalog.
#[derive(Debug, Clone, Default)]
pub struct ModeBlender {
    registry: ModeRegistry,
    custom: BTreeMap<String, RhythmicModeProfile>,
}

impl ModeBlender {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed base catalog.
    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    /// Blend base modes `a` and `b`.
    ///
    /// `ratio` is the weight of `b`. Above `0.5` the categorical fields come
    /// from `b`; at or below it they come from `a`.
    pub fn blend(
        &self,
        a: &str,
        b: &str,
        ratio: f64,
        name: Option<&str>,
    ) -> Result<HybridProfile> {
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(EngineError::InvalidRatio(ratio));
        }
        let pa = self.registry.get(a)?;
        let pb = self.registry.get(b)?;
        let dominant = if ratio > 0.5 { pb } else { pa };

        let max_len = pa.max_sentence_length as f64 * (1.0 - ratio)
            + pb.max_sentence_length as f64 * ratio;
        let modal = pa.modal_words_ratio * (1.0 - ratio) + pb.modal_words_ratio * ratio;

        let profile = RhythmicModeProfile {
            tempo: dominant.tempo,
            rhythm: dominant.rhythm,
            tone: dominant.tone,
            breath: dominant.breath,
            metaphor: format!("hybrid: {} → {}", pa.metaphor, pb.metaphor),
            // Half-way lengths round to even.
            max_sentence_length: max_len.round_ties_even() as u32,
            prefer_conjunctions: dominant.prefer_conjunctions,
            allow_questions: dominant.allow_questions,
            modal_words_ratio: modal,
        };

        Ok(HybridProfile {
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}_{}_hybrid", a, b)),
            parents: [a.to_string(), b.to_string()],
            ratio,
            profile,
        })
    }

    /// Store `profile` in the custom catalog, silently replacing any entry
    /// with the same name.
    pub fn register(&mut self, name: impl Into<String>, profile: RhythmicModeProfile) {
        let name = name.into();
        if self.custom.insert(name.clone(), profile).is_some() {
            log::debug!("Replaced custom mode '{}'", name);
        } else {
            log::debug!("Registered custom mode '{}'", name);
        }
    }

    /// Blend and register the result under its name.
    pub fn blend_and_register(
        &mut self,
        a: &str,
        b: &str,
        ratio: f64,
        name: Option<&str>,
    ) -> Result<HybridProfile> {
        let hybrid = self.blend(a, b, ratio, name)?;
        self.register(hybrid.name.clone(), hybrid.profile.clone());
        Ok(hybrid)
    }

    /// Remove a custom mode. Base modes cannot be removed.
    pub fn unregister(&mut self, name: &str) -> Option<RhythmicModeProfile> {
        self.custom.remove(name)
    }

    /// Look up a mode; custom entries shadow base entries.
    pub fn get(&self, key: &str) -> Result<&RhythmicModeProfile> {
        match self.custom.get(key) {
            Some(p) => Ok(p),
            None => self.registry.get(key),
        }
    }

    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    /// Union of base and custom catalogs; custom wins on collision.
    pub fn all_modes(&self) -> BTreeMap<String, RhythmicModeProfile> {
        let mut all = self.registry.modes().clone();
        for (name, profile) in &self.custom {
            all.insert(name.clone(), profile.clone());
        }
        all
    }
}

// ============================================================================
// Tests
// ============================================================================
