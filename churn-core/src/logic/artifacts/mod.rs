//! Artifacts Module - Persisted preprocessing transforms and model
//!
//! Đọc các transform đã fit lúc training (label mapper, one-hot mapper,
//! scaler) và classifier. Load một lần, dùng read-only suốt process.

pub mod label;
pub mod onehot;
pub mod scaler;

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ChurnError, Result};
use crate::logic::config::ArtifactPaths;
use crate::logic::features::encoder::FeatureEncoder;
use crate::logic::features::layout::FeatureSchema;
use crate::logic::model::inference::{load_classifier, Classifier};

// Re-export common types
pub use label::LabelMapper;
pub use onehot::OneHotMapper;
pub use scaler::StandardScaler;

// ============================================================================
// FINGERPRINTS
// ============================================================================

/// SHA-256 of one artifact file, reported by model status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFingerprint {
    pub name: String,
    pub path: String,
    pub sha256: String,
    pub size_bytes: u64,
}

/// Hash an artifact file
pub fn fingerprint(name: &str, path: &Path) -> Result<ArtifactFingerprint> {
    let bytes = std::fs::read(path).map_err(|e| ChurnError::artifact(path, e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);

    Ok(ArtifactFingerprint {
        name: name.to_string(),
        path: path.display().to_string(),
        sha256: hex::encode(hasher.finalize()),
        size_bytes: bytes.len() as u64,
    })
}

// ============================================================================
// ARTIFACT SET
// ============================================================================

/// Everything a predictor needs, loaded from disk
pub struct ArtifactSet {
    pub encoder: FeatureEncoder,
    pub classifier: Box<dyn Classifier>,
    pub fingerprints: Vec<ArtifactFingerprint>,
    pub loaded_at: DateTime<Utc>,
}

impl ArtifactSet {
    /// Load and cross-check all four artifacts
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        log::info!("Loading artifacts (model: {})", paths.model.display());

        let gender = LabelMapper::load(&paths.gender_encoder)?;
        let geography = OneHotMapper::load(&paths.geography_encoder)?;
        let scaler = StandardScaler::load(&paths.scaler)?;

        let schema = FeatureSchema::new(geography.feature(), geography.categories());
        let encoder = FeatureEncoder::new(schema, gender, geography, scaler)
            .map_err(|reason| ChurnError::artifact(&paths.scaler, reason))?;

        let classifier = load_classifier(&paths.model, encoder.schema().width())?;

        let fingerprints = paths
            .labelled()
            .iter()
            .map(|(name, path)| fingerprint(name, path))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Artifacts loaded: {} columns, engine {}, layout hash {:08x}",
            encoder.schema().width(),
            classifier.name(),
            encoder.schema().hash()
        );

        Ok(Self {
            encoder,
            classifier,
            fingerprints,
            loaded_at: Utc::now(),
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Read and deserialize a JSON artifact
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ChurnError::artifact(path, e.to_string()))?;

    serde_json::from_str(&text).map_err(|e| ChurnError::artifact(path, format!("invalid JSON: {}", e)))
}

/// First value that appears twice
pub(crate) fn first_duplicate(values: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .find(|v| !seen.insert(v.as_str()))
        .map(|v| v.as_str())
}
