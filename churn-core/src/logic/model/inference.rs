//! Inference Engine - ONNX Runtime Integration
//!
//! Load và chạy classifier. Engine được chọn theo đuôi file model,
//! dễ swap model mà không đụng tới encoder hay verdict.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::dense::DenseNetwork;
use crate::error::{ChurnError, Result};
use crate::logic::features::EncodedFeatureVector;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait cho inference engines (ONNX, dense network, fixed output)
pub trait Classifier: Send + Sync {
    /// Engine name for status and logs
    fn name(&self) -> &str;

    /// Expected input width, when the engine knows it
    fn input_width(&self) -> Option<usize>;

    /// Probability of the positive (churn) class for one row
    fn predict_proba(&self, features: &[f32]) -> Result<f32>;
}

/// Run a classifier on an encoded vector.
///
/// Checks the width before invoking and the probability range after.
pub fn invoke(classifier: &dyn Classifier, vector: &EncodedFeatureVector) -> Result<f32> {
    if let Some(expected) = classifier.input_width() {
        if vector.len() != expected {
            return Err(ChurnError::ModelInvocation(format!(
                "model expects {} features, vector has {}",
                expected,
                vector.len()
            )));
        }
    }

    let probability = classifier.predict_proba(vector.as_slice())?;

    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(ChurnError::ModelInvocation(format!(
            "model output {} is not a probability",
            probability
        )));
    }

    Ok(probability)
}

/// Pick an engine by file extension: `.onnx` or `.json` (dense export)
pub fn load_classifier(path: &Path, input_width: usize) -> Result<Box<dyn Classifier>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("onnx") => Ok(Box::new(OnnxClassifier::load(path, input_width)?)),
        Some("json") => {
            let network = DenseNetwork::load(path)?;
            if network.input_width() != input_width {
                return Err(ChurnError::artifact(
                    path,
                    format!(
                        "network takes {} inputs, feature layout has {}",
                        network.input_width(),
                        input_width
                    ),
                ));
            }
            Ok(Box::new(network))
        }
        _ => Err(ChurnError::artifact(
            path,
            "unsupported model format (expected .onnx or .json)",
        )),
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX Runtime session for a `[1, width] -> [1, 1]` sigmoid classifier
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
    input_width: usize,
}

impl OnnxClassifier {
    /// Load ONNX model từ file
    pub fn load(model_path: &Path, input_width: usize) -> Result<Self> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ChurnError::artifact(model_path, "model not found"));
        }

        let session = Session::builder()
            .map_err(|e| ChurnError::artifact(model_path, format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ChurnError::artifact(model_path, format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ChurnError::artifact(model_path, format!("Failed to load model: {}", e)))?;

        Self::from_session(session, input_width)
            .map_err(|reason| ChurnError::artifact(model_path, reason))
    }

    fn from_session(session: Session, input_width: usize) -> std::result::Result<Self, String> {
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| "No output defined".to_string())?;

        let classifier = Self {
            session: Mutex::new(session),
            output_name,
            input_width,
        };
        check_accepts_width(&classifier, input_width)?;

        Ok(classifier)
    }
}

/// Run one all-zero row of `width` columns through `classifier`.
///
/// Engines that cannot report their input shape are checked this way at
/// load, so a model trained on a different layout fails before serving.
pub fn check_accepts_width(classifier: &dyn Classifier, width: usize) -> std::result::Result<(), String> {
    classifier
        .predict_proba(&vec![0.0; width])
        .map(|_| ())
        .map_err(|e| format!("model does not accept {} input features: {}", width, e))
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.input_width)
    }

    fn predict_proba(&self, features: &[f32]) -> Result<f32> {
        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| ChurnError::ModelInvocation(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ChurnError::ModelInvocation(format!("Tensor error: {}", e)))?;

        // Session::run needs exclusive access
        let mut session = self.session.lock();

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ChurnError::ModelInvocation(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| ChurnError::ModelInvocation("No output".to_string()))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ChurnError::ModelInvocation(format!("Extract error: {}", e)))?;

        data.first()
            .copied()
            .ok_or_else(|| ChurnError::ModelInvocation("Empty output".to_string()))
    }
}

// ============================================================================
// FIXED OUTPUT
// ============================================================================

/// Returns the same probability for every input (scripted scenarios, tests)
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    probability: f32,
    input_width: Option<usize>,
}

impl FixedClassifier {
    pub fn new(probability: f32) -> Self {
        Self {
            probability,
            input_width: None,
        }
    }

    /// Also enforce an input width
    pub fn with_input_width(mut self, width: usize) -> Self {
        self.input_width = Some(width);
        self
    }
}

impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn input_width(&self) -> Option<usize> {
        self.input_width
    }

    fn predict_proba(&self, _features: &[f32]) -> Result<f32> {
        Ok(self.probability)
    }
}

// ============================================================================
// STATS
// ============================================================================

/// Latency stats, shared across requests
#[derive(Debug, Default)]
pub struct InferenceStats {
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl InferenceStats {
    pub fn record(&self, latency_us: u64) {
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        StatsSnapshot {
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FeatureSchema;

    fn vector(width_categories: usize) -> (FeatureSchema, EncodedFeatureVector) {
        let categories: Vec<String> = (0..width_categories).map(|i| format!("C{i}")).collect();
        let schema = FeatureSchema::new("Geography", &categories);
        let vector = EncodedFeatureVector::new(&schema, vec![0.0; schema.width()]);
        (schema, vector)
    }

    #[test]
    fn test_invoke_fixed() {
        let (_, v) = vector(3);
        let p = invoke(&FixedClassifier::new(0.73), &v).unwrap();
        assert_eq!(p, 0.73);
    }

    #[test]
    fn test_invoke_width_mismatch() {
        let (_, v) = vector(3);
        let classifier = FixedClassifier::new(0.5).with_input_width(11);
        match invoke(&classifier, &v) {
            Err(ChurnError::ModelInvocation(msg)) => assert!(msg.contains("expects 11")),
            other => panic!("expected ModelInvocation, got {other:?}"),
        }
    }

    #[test]
    fn test_invoke_rejects_non_probability() {
        let (_, v) = vector(3);
        assert!(invoke(&FixedClassifier::new(1.5), &v).is_err());
        assert!(invoke(&FixedClassifier::new(-0.1), &v).is_err());
        assert!(invoke(&FixedClassifier::new(f32::NAN), &v).is_err());
        assert!(invoke(&FixedClassifier::new(1.0), &v).is_ok());
        assert!(invoke(&FixedClassifier::new(0.0), &v).is_ok());
    }

    #[test]
    fn test_load_classifier_unknown_extension() {
        let result = load_classifier(Path::new("model.h5"), 12);
        assert!(matches!(result, Err(ChurnError::ArtifactLoad { .. })));
    }

    #[test]
    fn test_load_classifier_missing_onnx() {
        let result = load_classifier(Path::new("/nonexistent/model.onnx"), 12);
        assert!(matches!(result, Err(ChurnError::ArtifactLoad { .. })));
    }

    #[test]
    fn test_check_accepts_width() {
        assert!(check_accepts_width(&FixedClassifier::new(0.3), 12).is_ok());

        let narrow = DenseNetwork::from_export(crate::logic::model::dense::DenseNetworkExport {
            layers: vec![crate::logic::model::dense::DenseLayerExport {
                weights: vec![vec![0.5]; 11],
                bias: vec![0.0],
                activation: crate::logic::model::dense::Activation::Sigmoid,
            }],
        })
        .unwrap();

        let err = check_accepts_width(&narrow, 12).unwrap_err();
        assert!(err.contains("12 input features"), "unexpected reason: {err}");
        assert!(check_accepts_width(&narrow, 11).is_ok());
    }

    #[test]
    fn test_stats_average() {
        let stats = InferenceStats::default();
        assert_eq!(stats.snapshot().avg_latency_ms, 0.0);

        stats.record(1000);
        stats.record(3000);
        let snap = stats.snapshot();
        assert_eq!(snap.inference_count, 2);
        assert!((snap.avg_latency_ms - 2.0).abs() < 1e-6);
    }
}
