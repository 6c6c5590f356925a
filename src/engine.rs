//! Resonance engine — one context object owning every stateful component.
//!
//! Construct it once at startup and hand it (or a [`SharedEngine`]) to every
//! consumer. [`ResonanceEngine::reset`] rebuilds all state from the config.
//!
//! ```text
//! text ─ measure ─► signature ─┐
//! mode ─ blender.get ─► profile ┴─ score ─► resonance
//!                                             ├─ check "resonance_threshold"
//!                                             └─ tracker.record(mode, resonance)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::bounds::boundary::{BoundaryHandler, ViolationSummary};
use crate::bounds::spectrum::PersonalitySpectrum;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::modes::blender::{HybridProfile, ModeBlender};
use crate::prosody::extractor::measure;
use crate::prosody::signature::ProsodicSignature;
use crate::resonance::scorer::{penalties, score, Penalty};
use crate::resonance::tolerance::{AdaptiveToleranceTracker, ToleranceStatistics};

pub const RESONANCE_BOUNDARY: &str = "resonance_threshold";
pub const MODE_COUNT_BOUNDARY: &str = "mode_count";

/// An engine behind a single lock; every mutation goes through one writer.
pub type SharedEngine = Arc<Mutex<ResonanceEngine>>;

/// Outcome of analysing one text against one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceReading {
    pub mode: String,
    pub signature: ProsodicSignature,
    pub resonance: f64,
    pub penalties: Vec<Penalty>,
    /// Mode tolerance before this reading was recorded.
    pub tolerance: f64,
    /// `resonance >= tolerance`.
    pub accepted: bool,
    /// Whether the score passed the resonance boundary check.
    pub within_bounds: bool,
}

/// Read-only view of engine state, serializable for hosts that persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub modes: Vec<String>,
    pub tolerance: BTreeMap<String, f64>,
    pub statistics: ToleranceStatistics,
    pub traits: BTreeMap<String, f64>,
    pub violations: ViolationSummary,
}

#[derive(Debug, Clone)]
pub struct ResonanceEngine {
    config: EngineConfig,
    blender: ModeBlender,
    tracker: AdaptiveToleranceTracker,
    spectrum: PersonalitySpectrum,
    boundaries: BoundaryHandler,
}

impl ResonanceEngine {
    /// Validate `config` and build a fresh engine from it.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::build(config);
        engine.seed_hybrids()?;
        Ok(engine)
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            blender: ModeBlender::new(),
            tracker: AdaptiveToleranceTracker::new(config.tolerance.clone()),
            spectrum: PersonalitySpectrum::from_config(&config.traits),
            boundaries: BoundaryHandler::new(config.boundaries.clone())
                .with_acknowledgement_prefix(config.acknowledgement_prefix.clone()),
            config,
        }
    }

    fn seed_hybrids(&mut self) -> Result<()> {
        let seeds = self.config.hybrids.clone();
        for seed in &seeds {
            self.blender
                .blend_and_register(&seed.a, &seed.b, seed.ratio, seed.name.as_deref())?;
        }
        if !seeds.is_empty() {
            self.check_mode_count();
        }
        Ok(())
    }

    /// Drop all accumulated state and rebuild from the original config.
    ///
    /// Re-runs validation and hybrid seeding through [`ResonanceEngine::new`],
    /// hence the `Result`. The config is immutable after construction and
    /// already passed both steps once, so this does not fail in practice.
    pub fn reset(&mut self) -> Result<()> {
        *self = Self::new(self.config.clone())?;
        Ok(())
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    /// Measure `text`, score it against `mode`, and record the result.
    pub fn analyze(&mut self, text: &str, mode: &str) -> Result<ResonanceReading> {
        let profile = self.blender.get(mode)?;
        let signature = measure(text);
        let resonance = score(&signature, profile);
        let fired = penalties(&signature, profile);

        let tolerance = self
            .tracker
            .tolerance(mode)
            .unwrap_or(self.config.tolerance.unknown_mode_baseline);
        let accepted = resonance >= tolerance;
        let within_bounds = self.boundaries.check_boundary(RESONANCE_BOUNDARY, resonance);
        self.tracker.record(mode, resonance);

        Ok(ResonanceReading {
            mode: mode.to_string(),
            signature,
            resonance,
            penalties: fired,
            tolerance,
            accepted,
            within_bounds,
        })
    }

    /// Score `text` against every available mode, best first.
    ///
    /// Nothing is recorded. Equal scores are ordered by mode name.
    pub fn rank_modes(&self, text: &str) -> Vec<(String, f64)> {
        let signature = measure(text);
        let mut ranked: Vec<(String, f64)> = self
            .blender
            .all_modes()
            .into_iter()
            .map(|(name, profile)| {
                let s = score(&signature, &profile);
                (name, s)
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked
    }

    pub fn best_mode(&self, text: &str) -> Option<(String, f64)> {
        self.rank_modes(text).into_iter().next()
    }

    // -----------------------------------------------------------------------
    // Modes
    // -----------------------------------------------------------------------

    /// Blend two base modes, register the hybrid, and check the mode count.
    pub fn register_hybrid(
        &mut self,
        a: &str,
        b: &str,
        ratio: f64,
        name: Option<&str>,
    ) -> Result<HybridProfile> {
        let hybrid = self.blender.blend_and_register(a, b, ratio, name)?;
        self.check_mode_count();
        Ok(hybrid)
    }

    fn check_mode_count(&mut self) -> bool {
        let count = self.blender.all_modes().len() as f64;
        self.boundaries.check_boundary(MODE_COUNT_BOUNDARY, count)
    }

    // -----------------------------------------------------------------------
    // Traits
    // -----------------------------------------------------------------------

    pub fn update_trait(&mut self, name: &str, value: f64) -> bool {
        self.spectrum.update_state(name, value)
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            modes: self.blender.all_modes().into_keys().collect(),
            tolerance: self.tracker.report(),
            statistics: self.tracker.statistics(),
            traits: self.spectrum.snapshot(),
            violations: self.boundaries.get_violation_summary(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn blender(&self) -> &ModeBlender {
        &self.blender
    }

    pub fn blender_mut(&mut self) -> &mut ModeBlender {
        &mut self.blender
    }

    pub fn tracker(&self) -> &AdaptiveToleranceTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut AdaptiveToleranceTracker {
        &mut self.tracker
    }

    pub fn spectrum(&self) -> &PersonalitySpectrum {
        &self.spectrum
    }

    pub fn spectrum_mut(&mut self) -> &mut PersonalitySpectrum {
        &mut self.spectrum
    }

    pub fn boundaries(&self) -> &BoundaryHandler {
        &self.boundaries
    }

    pub fn boundaries_mut(&mut self) -> &mut BoundaryHandler {
        &mut self.boundaries
    }
}

impl Default for ResonanceEngine {
    fn default() -> Self {
        // The default config carries no hybrids, so nothing can fail here.
        Self::build(EngineConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
