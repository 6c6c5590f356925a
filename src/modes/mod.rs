//! Rhythmic modes — the fixed catalog, its profiles, and hybrid blending.
//!
//! # Architecture
//!
//! ```text
//! BaseMode (3 variants)
//!   ↓  profile()
//! ModeRegistry (fixed catalog, keyed by name)
//!   ↓  blend(a, b, ratio)
//! HybridProfile ──register──► ModeBlender custom catalog
//!   ↓  all_modes() / get()
//! RhythmicModeProfile handed to the resonance scorer
//! ```

pub mod blender;
pub mod profile;
pub mod registry;

pub use blender::{HybridProfile, ModeBlender, DEFAULT_BLEND_RATIO};
pub use profile::{BaseMode, ModeBreath, ModeRhythm, ModeTempo, ModeTone, RhythmicModeProfile};
pub use registry::ModeRegistry;
