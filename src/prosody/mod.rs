//! Prosody — coarse pacing signatures measured from raw text.

pub mod extractor;
pub mod signature;

pub use extractor::{measure, segments, ProsodyExtractor};
pub use signature::{
    ProsodicSignature, SignatureBreath, SignatureRhythm, SignatureTempo, SignatureTone,
};
