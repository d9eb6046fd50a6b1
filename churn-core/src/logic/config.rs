//! Artifact location configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    self, GENDER_ENCODER_FILE, GEOGRAPHY_ENCODER_FILE, MODEL_FALLBACK_FILE, MODEL_FILE,
    SCALER_FILE,
};

/// Paths of the four persisted artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Trained classifier (`.onnx` or `.json`)
    pub model: PathBuf,

    /// Gender label mapper
    pub gender_encoder: PathBuf,

    /// Geography one-hot mapper
    pub geography_encoder: PathBuf,

    /// Fitted numeric scaler
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Standard layout under `dir`.
    ///
    /// The model defaults to `model.onnx`; if that file does not exist but
    /// `model.json` does, the dense export is used instead.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let onnx = dir.join(MODEL_FILE);
        let dense = dir.join(MODEL_FALLBACK_FILE);
        let model = if !onnx.exists() && dense.exists() { dense } else { onnx };

        Self {
            model,
            gender_encoder: dir.join(GENDER_ENCODER_FILE),
            geography_encoder: dir.join(GEOGRAPHY_ENCODER_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }

    /// Load from environment variables.
    ///
    /// `ARTIFACT_DIR` sets the base directory; `MODEL_PATH`, `SCALER_PATH`,
    /// `GENDER_ENCODER_PATH` and `GEOGRAPHY_ENCODER_PATH` override single files.
    pub fn from_env() -> Self {
        let mut paths = Self::in_dir(constants::get_artifact_dir());

        if let Some(p) = constants::get_path_override("MODEL_PATH") {
            paths.model = p.into();
        }
        if let Some(p) = constants::get_path_override("SCALER_PATH") {
            paths.scaler = p.into();
        }
        if let Some(p) = constants::get_path_override("GENDER_ENCODER_PATH") {
            paths.gender_encoder = p.into();
        }
        if let Some(p) = constants::get_path_override("GEOGRAPHY_ENCODER_PATH") {
            paths.geography_encoder = p.into();
        }

        paths
    }

    /// All paths with a short label, in load order
    pub fn labelled(&self) -> [(&'static str, &Path); 4] {
        [
            ("gender_encoder", self.gender_encoder.as_path()),
            ("geography_encoder", self.geography_encoder.as_path()),
            ("scaler", self.scaler.as_path()),
            ("model", self.model.as_path()),
        ]
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(constants::DEFAULT_ARTIFACT_DIR)
    }
}
