//! VST Post-Process Error Types
//!
//! Centralized error handling using thiserror for type-safe errors.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the post-process sample
#[derive(Error, Debug)]
pub enum VstError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Test texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Synthetic test texture errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextureError {
    #[error("Texture dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("Texture {width}x{height} exceeds the maximum of {max} pixels per side")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Result type alias for top-level operations
pub type Result<T> = std::result::Result<T, VstError>;

/// Result type alias for Config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for texture generation
pub type TextureResult<T> = std::result::Result<T, TextureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextureError::EmptyDimensions {
            width: 0,
            height: 16,
        };
        assert_eq!(
            err.to_string(),
            "Texture dimensions must be non-zero (got 0x16)"
        );

        let err = ConfigError::Invalid {
            field: "post_process.cluster_size",
            reason: "must be at least 1 (got 0)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'post_process.cluster_size': must be at least 1 (got 0)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let texture_err = TextureError::TooLarge {
            width: 9000,
            height: 4,
            max: 8192,
        };
        let err: VstError = texture_err.into();
        assert!(matches!(err, VstError::Texture(_)));
    }
}
