//! Churn Predictor - encode → invoke → render
//!
//! Giữ artifact set đã load (read-only) và chạy pipeline cho từng request.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logic::artifacts::{ArtifactFingerprint, ArtifactSet};
use crate::logic::config::ArtifactPaths;
use crate::logic::features::{CustomerRecord, EncodedFeatureVector, FeatureEncoder, FeatureSchema, LayoutInfo};
use crate::logic::model::{invoke, Classifier, InferenceStats, Verdict};

// ============================================================================
// STATE
// ============================================================================

/// Process-wide predictor, loaded on first use
static SHARED: OnceCell<Arc<ChurnPredictor>> = OnceCell::new();

/// Load the artifact set once per process and hand out the same predictor.
///
/// Concurrent first callers block until one load finishes. A failed load is
/// not cached. Paths passed after a successful load are ignored.
pub fn shared(paths: &ArtifactPaths) -> Result<Arc<ChurnPredictor>> {
    SHARED
        .get_or_try_init(|| ChurnPredictor::load(paths).map(Arc::new))
        .cloned()
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0.0 - 1.0
    pub probability: f64,
    pub verdict: Verdict,
    /// Microseconds spent in encode + invoke
    pub inference_time_us: u64,
    /// Engine that produced the probability
    pub engine: String,
}

impl PredictionResult {
    pub fn is_churn(&self) -> bool {
        self.verdict.is_churn
    }
}

/// Model status for the UI / API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub engine: String,
    pub layout: LayoutInfo,
    pub gender_classes: Vec<String>,
    pub geography_categories: Vec<String>,
    pub decision_threshold: f64,
    pub artifacts: Vec<ArtifactFingerprint>,
    pub loaded_at: DateTime<Utc>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// PREDICTOR
// ============================================================================

pub struct ChurnPredictor {
    encoder: FeatureEncoder,
    classifier: Box<dyn Classifier>,
    fingerprints: Vec<ArtifactFingerprint>,
    loaded_at: DateTime<Utc>,
    stats: InferenceStats,
}

impl ChurnPredictor {
    /// Wire an encoder to a classifier (no artifact files involved)
    pub fn new(encoder: FeatureEncoder, classifier: Box<dyn Classifier>) -> Self {
        Self {
            encoder,
            classifier,
            fingerprints: Vec::new(),
            loaded_at: Utc::now(),
            stats: InferenceStats::default(),
        }
    }

    pub fn from_artifacts(set: ArtifactSet) -> Self {
        Self {
            encoder: set.encoder,
            classifier: set.classifier,
            fingerprints: set.fingerprints,
            loaded_at: set.loaded_at,
            stats: InferenceStats::default(),
        }
    }

    /// Load all artifacts from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        ArtifactSet::load(paths).map(Self::from_artifacts)
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.encoder.schema()
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn gender_classes(&self) -> &[String] {
        self.encoder.gender_classes()
    }

    pub fn geography_categories(&self) -> &[String] {
        self.encoder.geography_categories()
    }

    pub fn engine(&self) -> &str {
        self.classifier.name()
    }

    /// Encode only
    pub fn encode(&self, record: &CustomerRecord) -> Result<EncodedFeatureVector> {
        self.encoder.encode(record)
    }

    /// Invoke the classifier on a vector encoded under this predictor's layout
    pub fn predict_encoded(&self, vector: &EncodedFeatureVector) -> Result<f32> {
        vector.validate(self.schema())?;
        invoke(self.classifier.as_ref(), vector)
    }

    /// Full pipeline for one record
    pub fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult> {
        let start_time = Instant::now();

        let vector = self.encode(record)?;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Encoded features: {}", vector.to_log_entry(self.schema()));
        }
        let probability = self.predict_encoded(&vector)? as f64;

        let inference_time = start_time.elapsed().as_micros() as u64;
        self.stats.record(inference_time);

        let verdict = Verdict::from_probability(probability);

        log::debug!(
            "Prediction: p={:.4} churn={} ({}us, {})",
            probability,
            verdict.is_churn,
            inference_time,
            self.engine()
        );

        Ok(PredictionResult {
            probability,
            verdict,
            inference_time_us: inference_time,
            engine: self.engine().to_string(),
        })
    }

    pub fn status(&self) -> ModelStatus {
        let stats = self.stats.snapshot();

        ModelStatus {
            engine: self.engine().to_string(),
            layout: self.schema().info(),
            gender_classes: self.gender_classes().to_vec(),
            geography_categories: self.geography_categories().to_vec(),
            decision_threshold: crate::logic::model::DECISION_THRESHOLD,
            artifacts: self.fingerprints.clone(),
            loaded_at: self.loaded_at,
            inference_count: stats.inference_count,
            avg_latency_ms: stats.avg_latency_ms,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
