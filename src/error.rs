//! Engine errors.

use thiserror::Error;

/// Errors raised by mode lookup, blending, and configuration loading.
///
/// Bounds checks never produce an error: trait updates answer `false` and
/// unknown boundaries are treated as unconstrained.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Mode key is in neither the base catalog nor the custom catalog.
    #[error("Mode not found: {0}")]
    MissingMode(String),

    /// Blend ratio is not a finite value in `[0, 1]`.
    #[error("Blend ratio out of range: {0} (expected 0.0..=1.0)")]
    InvalidRatio(f64),

    /// Configuration validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mode_message_names_key() {
        let err = EngineError::MissingMode("lyrical".into());
        assert_eq!(err.to_string(), "Mode not found: lyrical");
    }

    #[test]
    fn test_yaml_error_converts() {
        let parse: std::result::Result<serde_yaml::Value, _> = serde_yaml::from_str("a: [1, 2");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Yaml(_)));
    }
}
