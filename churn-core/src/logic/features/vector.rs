//! Encoded Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Carries the version and hash of the layout it was encoded under, so a
//! predictor built on a different layout refuses it instead of guessing.

use serde::{Deserialize, Serialize};

use super::layout::FeatureSchema;
use crate::error::{ChurnError, Result};

/// Scaled feature row, ready for the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Scaled values in layout order
    pub values: Vec<f32>,
}

impl EncodedFeatureVector {
    /// Tag values with the schema they were encoded under
    pub fn new(schema: &FeatureSchema, values: Vec<f32>) -> Self {
        Self {
            version: schema.version(),
            layout_hash: schema.hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get value by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get value by column name
    pub fn get_by_name(&self, schema: &FeatureSchema, name: &str) -> Option<f32> {
        schema.index_of(name).and_then(|i| self.get(i))
    }

    /// Validate that this vector was produced under `schema`
    pub fn validate(&self, schema: &FeatureSchema) -> Result<()> {
        if self.version != schema.version()
            || self.layout_hash != schema.hash()
            || self.values.len() != schema.width()
        {
            return Err(ChurnError::LayoutMismatch {
                expected_version: schema.version(),
                expected_hash: schema.hash(),
                actual_version: self.version,
                actual_hash: self.layout_hash,
            });
        }
        Ok(())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self, schema: &FeatureSchema) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": schema.columns().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.clone(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new("Geography", &["France".to_string(), "Spain".to_string()])
    }

    #[test]
    fn test_new_tags_layout() {
        let schema = schema();
        let vector = EncodedFeatureVector::new(&schema, vec![0.0; 11]);
        assert_eq!(vector.version, schema.version());
        assert_eq!(vector.layout_hash, schema.hash());
        assert!(vector.validate(&schema).is_ok());
    }

    #[test]
    fn test_validate_hash_mismatch() {
        let schema = schema();
        let mut vector = EncodedFeatureVector::new(&schema, vec![0.0; 11]);
        vector.layout_hash = vector.layout_hash.wrapping_add(1);
        assert!(matches!(
            vector.validate(&schema),
            Err(ChurnError::LayoutMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_width_mismatch() {
        let schema = schema();
        let vector = EncodedFeatureVector::new(&schema, vec![0.0; 10]);
        assert!(vector.validate(&schema).is_err());
    }

    #[test]
    fn test_get_by_name() {
        let schema = schema();
        let mut values = vec![0.0; 11];
        values[2] = 0.25;
        let vector = EncodedFeatureVector::new(&schema, values);
        assert_eq!(vector.get_by_name(&schema, "Age"), Some(0.25));
        assert_eq!(vector.get_by_name(&schema, "nonexistent"), None);
    }

    #[test]
    fn test_to_log_entry() {
        let schema = schema();
        let vector = EncodedFeatureVector::new(&schema, vec![1.0; 11]);

        let log = vector.to_log_entry(&schema);
        assert_eq!(log["feature_version"], schema.version());
        assert!(log["layout_hash"].as_u64().is_some());
        assert_eq!(log["named_values"]["Geography_Spain"], 1.0);
    }
}
