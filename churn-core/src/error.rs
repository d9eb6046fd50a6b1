//! Error types for the churn pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ChurnError>;

#[derive(Error, Debug)]
pub enum ChurnError {
    /// Persisted artifact missing, unreadable or inconsistent. Fatal at startup.
    #[error("Failed to load artifact {}: {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    /// Input category outside the fitted set
    #[error("Unknown {feature} category '{value}' (known: {})", known.join(", "))]
    UnknownCategory {
        feature: String,
        value: String,
        known: Vec<String>,
    },

    /// Input value that cannot be encoded (NaN, infinite, or overflows when scaled)
    #[error("Invalid value for {column}: {reason}")]
    InvalidValue { column: String, reason: String },

    /// Model could not be invoked or returned an unusable output
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    /// Encoded vector was produced under a different feature schema
    #[error(
        "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
         got v{actual_version} (hash: {actual_hash:08x})"
    )]
    LayoutMismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },
}

impl ChurnError {
    pub fn artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ChurnError::ArtifactLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_category(feature: &str, value: &str, known: &[String]) -> Self {
        ChurnError::UnknownCategory {
            feature: feature.to_string(),
            value: value.to_string(),
            known: known.to_vec(),
        }
    }
}
