//! Model Module - Inference and verdict
//!
//! Tách logic inference khỏi encoding.
//! Dễ dàng swap model (ONNX, dense export) mà verdict không đổi.

pub mod inference;
pub mod dense;
pub mod threshold;

// Re-export common types
pub use inference::{check_accepts_width, invoke, load_classifier, Classifier, FixedClassifier, InferenceStats, OnnxClassifier, StatsSnapshot};
pub use dense::DenseNetwork;
pub use threshold::{Verdict, DECISION_THRESHOLD};
