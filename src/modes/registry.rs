//! Mode registry — the fixed catalog of canonical rhythmic modes.

use std::collections::BTreeMap;

use crate::error::{EngineError, Result};

use super::profile::{BaseMode, RhythmicModeProfile};

/// Fixed catalog of base rhythmic-mode profiles, keyed by mode name.
///
/// Built once from [`BaseMode::ALL`]; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: BTreeMap<String, RhythmicModeProfile>,
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeRegistry {
    pub fn new() -> Self {
        let modes = BaseMode::ALL
            .iter()
            .map(|m| (m.key().to_string(), m.profile()))
            .collect();
        Self { modes }
    }

    /// Look up a base profile. Unknown keys are an error.
    pub fn get(&self, key: &str) -> Result<&RhythmicModeProfile> {
        self.modes
            .get(key)
            .ok_or_else(|| EngineError::MissingMode(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modes.contains_key(key)
    }

    /// Catalog keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Borrow the whole catalog.
    pub fn modes(&self) -> &BTreeMap<String, RhythmicModeProfile> {
        &self.modes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_three_modes() {
        let reg = ModeRegistry::new();
        assert_eq!(reg.len(), 3);
        let keys: Vec<&str> = reg.keys().collect();
        assert_eq!(keys, vec!["active", "reflective", "uncertain"]);
    }

    #[test]
    fn test_get_known_mode() {
        let reg = ModeRegistry::new();
        let p = reg.get("active").unwrap();
        assert_eq!(p, &BaseMode::Active.profile());
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let reg = ModeRegistry::new();
        match reg.get("lyrical") {
            Err(EngineError::MissingMode(key)) => assert_eq!(key, "lyrical"),
            other => panic!("expected MissingMode, got {:?}", other),
        }
        assert!(!reg.contains("lyrical"));
    }
}
