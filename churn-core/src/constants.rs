//! Central Configuration Constants
//!
//! Single source of truth for artifact locations and app identity.
//! To move the artifact bundle, only edit this file or set the env vars below.

/// Default artifact directory (relative to the working directory)
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Gender label mapper, relative to the artifact directory
pub const GENDER_ENCODER_FILE: &str = "encoders/label_encoder_gender.json";

/// Geography one-hot mapper, relative to the artifact directory
pub const GEOGRAPHY_ENCODER_FILE: &str = "encoders/onehot_encoder_geo.json";

/// Fitted scaler, relative to the artifact directory
pub const SCALER_FILE: &str = "scaler.json";

/// Preferred model file; `MODEL_FALLBACK_FILE` is used when it is absent
pub const MODEL_FILE: &str = "model.onnx";

/// Dense-network export of the model
pub const MODEL_FALLBACK_FILE: &str = "model.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Churn Intelligence";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get artifact directory from environment or use default
pub fn get_artifact_dir() -> String {
    std::env::var("ARTIFACT_DIR")
        .unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string())
}

/// Read an optional path override, ignoring blank values
pub fn get_path_override(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
