//! # Prosody Engine
//!
//! Prosodic resonance and adaptive mode engine. Measures a coarse prosodic
//! signature from text, scores it against rhythmic mode profiles, blends
//! profiles into hybrids, adapts per-mode tolerance over repeated
//! observations, and guards personality traits and named numeric boundaries.
//!
//! ```rust
//! use prosody_engine::ResonanceEngine;
//!
//! let mut engine = ResonanceEngine::default();
//! let reading = engine.analyze("Hi. Is this working? Great.", "active").unwrap();
//! assert!((reading.resonance - 0.65).abs() < 1e-9);
//! ```

pub mod bounds;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod modes;
pub mod prosody;
pub mod resonance;

pub use bounds::{BoundaryHandler, PersonalitySpectrum};
pub use config::EngineConfig;
pub use engine::{EngineSnapshot, ResonanceEngine, ResonanceReading, SharedEngine};
pub use error::{EngineError, Result};
pub use modes::{HybridProfile, ModeBlender, ModeRegistry, RhythmicModeProfile};
pub use prosody::{measure, ProsodicSignature, ProsodyExtractor};
pub use resonance::{AdaptiveToleranceTracker, ResonanceScorer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
