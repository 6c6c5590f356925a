//! Bounds — guarded personality traits and logged numeric boundaries.
//!
//! The two halves differ on unknown names: the spectrum answers
//! `false` for a trait it does not know, the boundary handler answers `true`
//! for a boundary it does not know.

pub mod boundary;
pub mod spectrum;

pub use boundary::{
    acknowledge_limitation, BoundaryHandler, BoundaryViolation, ViolationSummary, ALL_SATISFIED,
};
pub use spectrum::{PersonalitySpectrum, TraitRange};

pub use crate::config::BoundaryDefinition;
