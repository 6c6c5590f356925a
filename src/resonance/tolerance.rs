//! Adaptive tolerance — per-mode acceptance thresholds that drift with
//! observed resonance.
//!
//! Every recorded score nudges its mode's tolerance by one step: down when
//! the score falls below the pivot, up otherwise. Tolerance never leaves
//! `[floor, ceiling]`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ToleranceConfig;
use crate::modes::profile::BaseMode;

/// One recorded resonance score. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub mode: String,
    pub resonance: f64,
    pub time: DateTime<Utc>,
}

/// Per-mode aggregate over the observation history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeStatistics {
    pub count: usize,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregate over the whole observation history.
///
/// `by_mode` is absent while the history is empty, and only ever covers the
/// canonical modes that have at least one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceStatistics {
    pub total: usize,
    pub avg_resonance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_mode: Option<BTreeMap<String, ModeStatistics>>,
}

/// Records scores per mode and adapts per-mode tolerance.
#[derive(Debug, Clone)]
pub struct AdaptiveToleranceTracker {
    config: ToleranceConfig,
    tolerance: BTreeMap<String, f64>,
    history: Vec<Observation>,
}

impl Default for AdaptiveToleranceTracker {
    fn default() -> Self {
        Self::new(ToleranceConfig::default())
    }
}

impl AdaptiveToleranceTracker {
    pub fn new(config: ToleranceConfig) -> Self {
        Self {
            tolerance: config.defaults.clone(),
            config,
            history: Vec::new(),
        }
    }

    /// Record a resonance score for `mode` and return its new tolerance.
    ///
    /// A mode without a tolerance entry starts from the configured baseline
    /// before the step is applied.
    pub fn record(&mut self, mode: &str, resonance: f64) -> f64 {
        if !(0.0..=1.0).contains(&resonance) {
            log::warn!(
                "Recording out-of-range resonance {} for mode '{}'",
                resonance,
                mode
            );
        }
        self.history.push(Observation {
            mode: mode.to_string(),
            resonance,
            time: Utc::now(),
        });

        let current = match self.tolerance.get(mode) {
            Some(t) => *t,
            None => {
                log::debug!(
                    "Creating tolerance for mode '{}' at baseline {}",
                    mode,
                    self.config.unknown_mode_baseline
                );
                self.config.unknown_mode_baseline
            }
        };
        let updated = if resonance < self.config.pivot {
            (current - self.config.step).max(self.config.floor)
        } else {
            (current + self.config.step).min(self.config.ceiling)
        };
        log::debug!("Tolerance for '{}': {:.3} -> {:.3}", mode, current, updated);
        self.tolerance.insert(mode.to_string(), updated);
        updated
    }

    /// Current tolerance for every known mode.
    pub fn report(&self) -> BTreeMap<String, f64> {
        self.tolerance.clone()
    }

    pub fn tolerance(&self, mode: &str) -> Option<f64> {
        self.tolerance.get(mode).copied()
    }

    /// Whether `resonance` clears the mode's current tolerance.
    pub fn accepts(&self, mode: &str, resonance: f64) -> bool {
        let threshold = self
            .tolerance(mode)
            .unwrap_or(self.config.unknown_mode_baseline);
        resonance >= threshold
    }

    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    pub fn statistics(&self) -> ToleranceStatistics {
        if self.history.is_empty() {
            return ToleranceStatistics {
                total: 0,
                avg_resonance: 0.0,
                by_mode: None,
            };
        }

        let total = self.history.len();
        let sum: f64 = self.history.iter().map(|o| o.resonance).sum();

        let mut by_mode = BTreeMap::new();
        for mode in BaseMode::ALL {
            let scores: Vec<f64> = self
                .history
                .iter()
                .filter(|o| o.mode == mode.key())
                .map(|o| o.resonance)
                .collect();
            if scores.is_empty() {
                continue;
            }
            by_mode.insert(
                mode.key().to_string(),
                ModeStatistics {
                    count: scores.len(),
                    avg: scores.iter().sum::<f64>() / scores.len() as f64,
                    min: scores.iter().copied().fold(f64::INFINITY, f64::min),
                    max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                },
            );
        }

        ToleranceStatistics {
            total,
            avg_resonance: sum / total as f64,
            by_mode: Some(by_mode),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_default_report() {
        let t = AdaptiveToleranceTracker::default();
        let r = t.report();
        assert_eq!(r.len(), 3);
        assert_eq!(r["reflective"], 0.8);
        assert_eq!(r["active"], 0.5);
        assert_eq!(r["uncertain"], 0.7);
    }

    #[test]
    fn test_high_resonance_raises_to_ceiling() {
        let mut t = AdaptiveToleranceTracker::default();
        let mut prev = t.tolerance("active").unwrap();
        for _ in 0..20 {
            let next = t.record("active", 0.9);
            assert!(next >= prev);
            assert!(next <= 1.0);
            prev = next;
        }
        assert_eq!(t.tolerance("active"), Some(1.0));
    }

    #[test]
    fn test_low_resonance_lowers_to_floor() {
        let mut t = AdaptiveToleranceTracker::default();
        let mut prev = t.tolerance("reflective").unwrap();
        for _ in 0..20 {
            let next = t.record("reflective", 0.2);
            assert!(next <= prev);
            assert!(next >= 0.3);
            prev = next;
        }
        assert_eq!(t.tolerance("reflective"), Some(0.3));
    }

    #[test]
    fn test_pivot_counts_as_high() {
        let mut t = AdaptiveToleranceTracker::default();
        let after = t.record("uncertain", 0.6);
        assert!((after - 0.75).abs() < EPS);
        let after = t.record("uncertain", 0.59);
        assert!((after - 0.7).abs() < EPS);
    }

    #[test]
    fn test_unknown_mode_starts_from_baseline() {
        let mut t = AdaptiveToleranceTracker::default();
        assert_eq!(t.tolerance("reflective_active_hybrid"), None);
        let after = t.record("reflective_active_hybrid", 0.9);
        assert!((after - 0.55).abs() < EPS);
        assert_eq!(t.report().len(), 4);

        let after = t.record("lyrical", 0.1);
        assert!((after - 0.45).abs() < EPS);
    }

    #[test]
    fn test_history_is_append_only() {
        let mut t = AdaptiveToleranceTracker::default();
        t.record("active", 0.7);
        t.record("reflective", 0.4);
        let h = t.history();
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].mode, "active");
        assert_eq!(h[1].mode, "reflective");
        assert!(h[0].time <= h[1].time);
    }

    #[test]
    fn test_empty_statistics() {
        let t = AdaptiveToleranceTracker::default();
        let s = t.statistics();
        assert_eq!(s.total, 0);
        assert_eq!(s.avg_resonance, 0.0);
        assert!(s.by_mode.is_none());
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("by_mode").is_none());
    }

    #[test]
    fn test_statistics_restricts_breakdown_to_canonical_modes() {
        let mut t = AdaptiveToleranceTracker::default();
        t.record("active", 0.4);
        t.record("active", 0.8);
        t.record("custom_blend", 1.0);
        t.record("reflective", 0.6);

        let s = t.statistics();
        assert_eq!(s.total, 4);
        // overall mean includes the custom mode
        assert!((s.avg_resonance - 0.7).abs() < EPS);

        let by_mode = s.by_mode.unwrap();
        assert_eq!(by_mode.len(), 2);
        assert!(!by_mode.contains_key("custom_blend"));
        assert!(!by_mode.contains_key("uncertain"));
        let active = by_mode["active"];
        assert_eq!(active.count, 2);
        assert!((active.avg - 0.6).abs() < EPS);
        assert_eq!(active.min, 0.4);
        assert_eq!(active.max, 0.8);
    }

    #[test]
    fn test_accepts_compares_against_tolerance() {
        let t = AdaptiveToleranceTracker::default();
        assert!(t.accepts("active", 0.5));
        assert!(!t.accepts("reflective", 0.79));
        assert!(t.accepts("never_seen", 0.5));
        assert!(!t.accepts("never_seen", 0.49));
    }

    #[test]
    fn test_custom_step_and_band() {
        let config = ToleranceConfig {
            step: 0.2,
            floor: 0.4,
            ceiling: 0.9,
            ..ToleranceConfig::default()
        };
        let mut t = AdaptiveToleranceTracker::new(config);
        assert!((t.record("active", 0.95) - 0.7).abs() < EPS);
        assert!((t.record("active", 0.95) - 0.9).abs() < EPS);
        assert!((t.record("active", 0.95) - 0.9).abs() < EPS);
        t.record("active", 0.0);
        t.record("active", 0.0);
        assert!((t.record("active", 0.0) - 0.4).abs() < EPS);
    }
}
