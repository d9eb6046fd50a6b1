//! Churn Intelligence - Core
//!
//! Feature encoding, inference and verdict for the churn form.
//!
//! ```text
//! CustomerRecord ──► FeatureEncoder ──► Classifier ──► Verdict
//!                    (label, one-hot,   (ONNX /        (p > 0.5)
//!                     scaler)            dense)
//! ```
//!
//! Artifacts are loaded once per process via [`predictor::shared`] and are
//! read-only afterwards.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ChurnError, Result};
pub use logic::artifacts::{ArtifactFingerprint, ArtifactSet, LabelMapper, OneHotMapper, StandardScaler};
pub use logic::config::ArtifactPaths;
pub use logic::features::{
    CustomerRecord, EncodedFeatureVector, FeatureEncoder, FeatureSchema, LayoutInfo,
};
pub use logic::model::{Classifier, DenseNetwork, FixedClassifier, OnnxClassifier, Verdict};
pub use logic::predictor::{self as predictor, ChurnPredictor, ModelStatus, PredictionResult};
