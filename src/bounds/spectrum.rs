//! Personality spectrum — per-trait allowed ranges with guarded mutation.
//!
//! Out-of-range or unknown-trait updates are rejected with `false` and leave
//! the state untouched. Nothing is logged; breaches that need an audit trail
//! belong in [`super::boundary::BoundaryHandler`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::{default_traits, TraitConfig};

/// Inclusive allowed range of a trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitRange {
    pub lower: f64,
    pub upper: f64,
}

impl TraitRange {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn half_range(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Trait bounds and current values.
///
/// Invariant: for every trait, `lower <= current <= upper`.
#[derive(Debug, Clone)]
pub struct PersonalitySpectrum {
    lower: HashMap<String, f64>,
    upper: HashMap<String, f64>,
    current: HashMap<String, f64>,
}

impl Default for PersonalitySpectrum {
    fn default() -> Self {
        Self::from_config(&default_traits())
    }
}

impl PersonalitySpectrum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from validated trait settings (see [`crate::config::EngineConfig::validate`]).
    pub fn from_config(traits: &BTreeMap<String, TraitConfig>) -> Self {
        let mut spectrum = Self {
            lower: HashMap::new(),
            upper: HashMap::new(),
            current: HashMap::new(),
        };
        for (name, t) in traits {
            spectrum.lower.insert(name.clone(), t.lower);
            spectrum.upper.insert(name.clone(), t.upper);
            spectrum.current.insert(name.clone(), t.current);
        }
        spectrum
    }

    /// `false` for unknown traits; otherwise whether `value` is in range.
    pub fn is_within_bounds(&self, name: &str, value: f64) -> bool {
        self.range(name).is_some_and(|r| r.contains(value))
    }

    /// Set the trait to `value` if it is in range. Returns whether it changed.
    pub fn update_state(&mut self, name: &str, value: f64) -> bool {
        if !self.is_within_bounds(name, value) {
            return false;
        }
        self.current.insert(name.to_string(), value);
        true
    }

    /// Signed position of the current value within its range: `-1` at the
    /// lower bound, `0` at the center, `1` at the upper bound.
    ///
    /// `0.0` for unknown traits and zero-width ranges.
    pub fn distance_from_center(&self, name: &str) -> f64 {
        let Some(current) = self.current.get(name) else {
            return 0.0;
        };
        let Some(range) = self.range(name) else {
            return 0.0;
        };
        let half = range.half_range();
        if half == 0.0 {
            return 0.0;
        }
        (current - range.center()) / half
    }

    pub fn current(&self, name: &str) -> Option<f64> {
        self.current.get(name).copied()
    }

    pub fn range(&self, name: &str) -> Option<TraitRange> {
        match (self.lower.get(name), self.upper.get(name)) {
            (Some(lower), Some(upper)) => Some(TraitRange {
                lower: *lower,
                upper: *upper,
            }),
            _ => None,
        }
    }

    /// Trait names in sorted order.
    pub fn traits(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.current.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Current values, sorted by trait.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.current
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
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
    fn test_defaults() {
        let s = PersonalitySpectrum::new();
        assert_eq!(s.traits(), vec!["active", "reflective", "uncertain"]);
        for name in s.traits() {
            assert_eq!(s.current(name), Some(0.6));
            assert_eq!(s.range(name), Some(TraitRange { lower: 0.3, upper: 1.0 }));
        }
    }

    #[test]
    fn test_update_within_bounds() {
        let mut s = PersonalitySpectrum::new();
        assert!(s.update_state("reflective", 0.95));
        assert_eq!(s.current("reflective"), Some(0.95));
    }

    #[test]
    fn test_update_out_of_bounds_is_rejected() {
        let mut s = PersonalitySpectrum::new();
        assert!(!s.update_state("reflective", 1.5));
        assert_eq!(s.current("reflective"), Some(0.6));
        assert!(!s.update_state("reflective", 0.29));
        assert_eq!(s.current("reflective"), Some(0.6));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let s = PersonalitySpectrum::new();
        assert!(s.is_within_bounds("active", 0.3));
        assert!(s.is_within_bounds("active", 1.0));
    }

    #[test]
    fn test_unknown_trait_is_silently_false() {
        let mut s = PersonalitySpectrum::new();
        assert!(!s.is_within_bounds("playful", 0.5));
        assert!(!s.update_state("playful", 0.5));
        assert_eq!(s.current("playful"), None);
        assert_eq!(s.traits().len(), 3);
    }

    #[test]
    fn test_distance_from_center() {
        let mut s = PersonalitySpectrum::new();
        // center 0.65, half-range 0.35
        assert!((s.distance_from_center("active") - (-0.05 / 0.35)).abs() < EPS);
        s.update_state("active", 1.0);
        assert!((s.distance_from_center("active") - 1.0).abs() < EPS);
        s.update_state("active", 0.3);
        assert!((s.distance_from_center("active") + 1.0).abs() < EPS);
        assert_eq!(s.distance_from_center("playful"), 0.0);
    }

    #[test]
    fn test_zero_width_range_has_no_distance() {
        let traits = BTreeMap::from([(
            "fixed".to_string(),
            TraitConfig {
                lower: 0.5,
                upper: 0.5,
                current: 0.5,
            },
        )]);
        let mut s = PersonalitySpectrum::from_config(&traits);
        assert_eq!(s.distance_from_center("fixed"), 0.0);
        assert!(s.update_state("fixed", 0.5));
        assert!(!s.update_state("fixed", 0.51));
    }
}
