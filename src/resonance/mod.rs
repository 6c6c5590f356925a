//! Resonance — scoring signatures against modes and adapting tolerance.

pub mod scorer;
pub mod tolerance;

pub use scorer::{penalties, score, Penalty, ResonanceScorer};
pub use tolerance::{AdaptiveToleranceTracker, ModeStatistics, Observation, ToleranceStatistics};
