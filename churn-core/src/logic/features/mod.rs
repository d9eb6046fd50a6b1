//! Features Module - Feature Encoding Engine
//!
//! Tách logic encode khỏi form input và model.
//! Column order được định nghĩa duy nhất trong `layout.rs`.

pub mod layout;
pub mod record;
pub mod vector;
pub mod encoder;


// Re-export common types
pub use encoder::FeatureEncoder;
pub use layout::{FeatureSchema, LayoutInfo, BASE_COLUMNS, BASE_COLUMN_COUNT, FEATURE_VERSION};
pub use record::CustomerRecord;
pub use vector::EncodedFeatureVector;
