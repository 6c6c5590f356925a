//! Boundary handler — named numeric ranges with a violation log.
//!
//! Unlike the personality spectrum, a failed check here is recorded for
//! later review. Names outside the catalog are not checked at all.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{default_boundaries, BoundaryDefinition, DEFAULT_ACKNOWLEDGEMENT_PREFIX};

/// A failed boundary check. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryViolation {
    pub boundary: String,
    pub value: f64,
    /// Rendered range, e.g. `"[0.0, 1.0]"`.
    pub limits: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Summary of the violation log.
///
/// An empty log carries only `message`; otherwise `by_boundary` and
/// `latest` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationSummary {
    pub total_violations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_boundary: Option<BTreeMap<String, usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<BoundaryViolation>,
}

pub const ALL_SATISFIED: &str = "all boundaries satisfied";

/// Checks values against a fixed catalog of named ranges.
#[derive(Debug, Clone)]
pub struct BoundaryHandler {
    boundaries: BTreeMap<String, BoundaryDefinition>,
    violations: Vec<BoundaryViolation>,
    acknowledgement_prefix: String,
}

impl Default for BoundaryHandler {
    fn default() -> Self {
        Self::new(default_boundaries())
    }
}

impl BoundaryHandler {
    pub fn new(boundaries: BTreeMap<String, BoundaryDefinition>) -> Self {
        Self {
            boundaries,
            violations: Vec::new(),
            acknowledgement_prefix: DEFAULT_ACKNOWLEDGEMENT_PREFIX.to_string(),
        }
    }

    pub fn with_acknowledgement_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.acknowledgement_prefix = prefix.into();
        self
    }

    /// Check `value` against the named boundary.
    ///
    /// Unknown names pass unchecked. A known boundary that is breached is
    /// logged and answers `false`.
    pub fn check_boundary(&mut self, name: &str, value: f64) -> bool {
        let Some(def) = self.boundaries.get(name) else {
            return true;
        };
        if def.min <= value && value <= def.max {
            return true;
        }

        let violation = BoundaryViolation {
            boundary: name.to_string(),
            value,
            limits: format_limits(def.min, def.max),
            description: def.description.clone(),
            timestamp: Utc::now(),
        };
        log::warn!(
            "Boundary '{}' violated: {} outside {}",
            name,
            value,
            violation.limits
        );
        self.violations.push(violation);
        false
    }

    pub fn get_violation_summary(&self) -> ViolationSummary {
        let Some(latest) = self.violations.last() else {
            return ViolationSummary {
                total_violations: 0,
                message: Some(ALL_SATISFIED.to_string()),
                by_boundary: None,
                latest: None,
            };
        };

        let mut by_boundary = BTreeMap::new();
        for v in &self.violations {
            *by_boundary.entry(v.boundary.clone()).or_insert(0) += 1;
        }
        ViolationSummary {
            total_violations: self.violations.len(),
            message: None,
            by_boundary: Some(by_boundary),
            latest: Some(latest.clone()),
        }
    }

    /// Wrap `text` in the acknowledgement prefix. Does not touch the log.
    pub fn acknowledge_limitation(&self, text: &str) -> String {
        acknowledge_limitation(&self.acknowledgement_prefix, text)
    }

    pub fn violations(&self) -> &[BoundaryViolation] {
        &self.violations
    }

    pub fn boundary(&self, name: &str) -> Option<&BoundaryDefinition> {
        self.boundaries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boundaries.keys().map(String::as_str)
    }
}

/// `prefix` followed by `text`.
pub fn acknowledge_limitation(prefix: &str, text: &str) -> String {
    format!("{}{}", prefix, text)
}

// Debug formatting keeps the decimal point on whole numbers: 1.0, not 1.
fn format_limits(min: f64, max: f64) -> String {
    format!("[{:?}, {:?}]", min, max)
}

// ============================================================================
// Tests
// ============================================================================
