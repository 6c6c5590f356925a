//! Engine configuration — defaults, YAML loading, and validation.
//!
//! Every section has `#[serde(default)]`, and the keyed maps (`traits`,
//! `boundaries`, `tolerance.defaults`) merge per key onto their defaults, so
//! a partial YAML document only overrides what it names:
//!
//! ```yaml
//! tolerance:
//!   defaults: { reflective: 0.9, active: 0.4, uncertain: 0.7 }
//!   step: 0.1
//! traits:
//!   reflective: { lower: 0.2, upper: 0.9, current: 0.5 }
//! hybrids:
//!   - { a: reflective, b: active, ratio: 0.3, name: brisk_reflection }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, Result};
use crate::modes::blender::DEFAULT_BLEND_RATIO;
use crate::modes::profile::BaseMode;

// ============================================================================
// Tolerance
// ============================================================================

/// Adaptive tolerance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Starting tolerance per mode. Entries merge onto the canonical defaults.
    #[serde(deserialize_with = "merge_tolerance_defaults")]
    pub defaults: BTreeMap<String, f64>,
    /// Resonance below this lowers tolerance; at or above raises it.
    pub pivot: f64,
    /// Adjustment applied on every observation.
    pub step: f64,
    pub floor: f64,
    pub ceiling: f64,
    /// Tolerance assumed for a mode seen for the first time, before its
    /// first adjustment.
    pub unknown_mode_baseline: f64,
}

pub fn default_tolerances() -> BTreeMap<String, f64> {
    BTreeMap::from([
        (BaseMode::Reflective.key().to_string(), 0.8),
        (BaseMode::Active.key().to_string(), 0.5),
        (BaseMode::Uncertain.key().to_string(), 0.7),
    ])
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            defaults: default_tolerances(),
            pivot: 0.6,
            step: 0.05,
            floor: 0.3,
            ceiling: 1.0,
            unknown_mode_baseline: 0.5,
        }
    }
}

// ============================================================================
// Traits and boundaries
// ============================================================================

/// Allowed range and starting value of one personality trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitConfig {
    pub lower: f64,
    pub upper: f64,
    pub current: f64,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            lower: 0.3,
            upper: 1.0,
            current: 0.6,
        }
    }
}

/// A named numeric range checked by the boundary handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDefinition {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub description: String,
}

/// A hybrid mode registered when the engine starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridSeed {
    pub a: String,
    pub b: String,
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_ratio() -> f64 {
    DEFAULT_BLEND_RATIO
}

pub fn default_traits() -> BTreeMap<String, TraitConfig> {
    BaseMode::ALL
        .iter()
        .map(|m| (m.key().to_string(), TraitConfig::default()))
        .collect()
}

pub fn default_boundaries() -> BTreeMap<String, BoundaryDefinition> {
    BTreeMap::from([
        (
            "resonance_threshold".to_string(),
            BoundaryDefinition {
                min: 0.0,
                max: 1.0,
                description: "resonance score must stay within the unit interval".into(),
            },
        ),
        (
            "mode_count".to_string(),
            BoundaryDefinition {
                min: 1.0,
                max: 10.0,
                description: "number of available rhythmic modes".into(),
            },
        ),
    ])
}

pub const SEED_BOUNDARIES: [&str; 2] = ["resonance_threshold", "mode_count"];

// ----------------------------------------------------------------------------
// Per-key merging onto defaults
// ----------------------------------------------------------------------------

fn merge_onto<'de, D, V>(
    deserializer: D,
    mut base: BTreeMap<String, V>,
) -> std::result::Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let overrides = BTreeMap::<String, V>::deserialize(deserializer)?;
    base.extend(overrides);
    Ok(base)
}

fn merge_tolerance_defaults<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, f64>, D::Error> {
    merge_onto(deserializer, default_tolerances())
}

fn merge_traits<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, TraitConfig>, D::Error> {
    merge_onto(deserializer, default_traits())
}

fn merge_boundaries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, BoundaryDefinition>, D::Error> {
    merge_onto(deserializer, default_boundaries())
}

pub const DEFAULT_ACKNOWLEDGEMENT_PREFIX: &str = "I have to acknowledge a limitation: ";

// ============================================================================
// Engine config
// ============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tolerance: ToleranceConfig,
    /// Entries merge onto the three canonical traits.
    #[serde(deserialize_with = "merge_traits")]
    pub traits: BTreeMap<String, TraitConfig>,
    /// Entries merge onto the seed boundaries.
    #[serde(deserialize_with = "merge_boundaries")]
    pub boundaries: BTreeMap<String, BoundaryDefinition>,
    pub hybrids: Vec<HybridSeed>,
    pub acknowledgement_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: ToleranceConfig::default(),
            traits: default_traits(),
            boundaries: default_boundaries(),
            hybrids: Vec::new(),
            acknowledgement_prefix: DEFAULT_ACKNOWLEDGEMENT_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every range invariant.
    pub fn validate(&self) -> Result<()> {
        let t = &self.tolerance;
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !unit(t.pivot) {
            return Err(EngineError::Validation(format!(
                "tolerance.pivot must lie in [0, 1], got {}",
                t.pivot
            )));
        }
        if !(t.step.is_finite() && t.step > 0.0 && t.step <= 1.0) {
            return Err(EngineError::Validation(format!(
                "tolerance.step must lie in (0, 1], got {}",
                t.step
            )));
        }
        if !(unit(t.floor) && unit(t.ceiling) && t.floor <= t.ceiling) {
            return Err(EngineError::Validation(format!(
                "tolerance requires 0 <= floor <= ceiling <= 1, got [{}, {}]",
                t.floor, t.ceiling
            )));
        }
        let in_band = |v: f64| v.is_finite() && v >= t.floor && v <= t.ceiling;
        if !in_band(t.unknown_mode_baseline) {
            return Err(EngineError::Validation(format!(
                "tolerance.unknown_mode_baseline {} outside [{}, {}]",
                t.unknown_mode_baseline, t.floor, t.ceiling
            )));
        }
        for (mode, v) in &t.defaults {
            if !in_band(*v) {
                return Err(EngineError::Validation(format!(
                    "tolerance for '{}' is {}, outside [{}, {}]",
                    mode, v, t.floor, t.ceiling
                )));
            }
        }

        for mode in BaseMode::ALL {
            if !t.defaults.contains_key(mode.key()) {
                return Err(EngineError::Validation(format!(
                    "tolerance.defaults is missing canonical mode '{}'",
                    mode
                )));
            }
            if !self.traits.contains_key(mode.key()) {
                return Err(EngineError::Validation(format!(
                    "traits is missing canonical trait '{}'",
                    mode
                )));
            }
        }
        for name in SEED_BOUNDARIES {
            if !self.boundaries.contains_key(name) {
                return Err(EngineError::Validation(format!(
                    "boundaries is missing seed boundary '{}'",
                    name
                )));
            }
        }

        for (name, tr) in &self.traits {
            if !unit(tr.lower) || !unit(tr.upper) || !unit(tr.current) {
                return Err(EngineError::Validation(format!(
                    "trait '{}' values must lie in [0, 1]",
                    name
                )));
            }
            if !(tr.lower <= tr.current && tr.current <= tr.upper) {
                return Err(EngineError::Validation(format!(
                    "trait '{}' requires lower <= current <= upper, got {} / {} / {}",
                    name, tr.lower, tr.current, tr.upper
                )));
            }
        }

        for (name, b) in &self.boundaries {
            if !b.min.is_finite() || !b.max.is_finite() || b.min > b.max {
                return Err(EngineError::Validation(format!(
                    "boundary '{}' requires min <= max, got [{}, {}]",
                    name, b.min, b.max
                )));
            }
        }

        for seed in &self.hybrids {
            if !seed.ratio.is_finite() || !(0.0..=1.0).contains(&seed.ratio) {
                return Err(EngineError::InvalidRatio(seed.ratio));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
