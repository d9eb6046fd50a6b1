//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the column order fed to the scaler and model**
//!
//! ## Rules (NEVER break these):
//! 1. Add column → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove column → increment FEATURE_VERSION
//!
//! The order must match the order the scaler was fitted on. A wrong order
//! does not fail at inference time, it silently produces wrong predictions,
//! so the loader checks it against the scaler's recorded column names.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when BASE_COLUMNS changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Scalar columns in exact order, before the one-hot block
pub const BASE_COLUMNS: &[&str] = &[
    "CreditScore",       // 0: raw credit score
    "Gender",            // 1: label-mapped gender code
    "Age",               // 2: years
    "Tenure",            // 3: years with the bank
    "Balance",           // 4: account balance
    "NumOfProducts",     // 5: products held
    "HasCrCard",         // 6: 0/1
    "IsActiveMember",    // 7: 0/1
    "EstimatedSalary",   // 8: yearly salary estimate
];

/// Number of scalar columns
/// IMPORTANT: Must match BASE_COLUMNS.len()!
pub const BASE_COLUMN_COUNT: usize = 9;

// ============================================================================
// SCHEMA
// ============================================================================

/// Complete column layout: scalar columns, then one column per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
    onehot_start: usize,
    hash: u32,
}

impl FeatureSchema {
    /// Build the layout for a one-hot feature and its learned categories
    pub fn new(onehot_feature: &str, categories: &[String]) -> Self {
        let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|s| s.to_string()).collect();
        columns.extend(categories.iter().map(|c| format!("{}_{}", onehot_feature, c)));

        let hash = compute_layout_hash(&columns);
        Self {
            columns,
            onehot_start: BASE_COLUMN_COUNT,
            hash,
        }
    }

    /// Total column count (`9 + |categories|`)
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The one-hot columns only
    pub fn onehot_columns(&self) -> &[String] {
        &self.columns[self.onehot_start..]
    }

    pub fn version(&self) -> u8 {
        FEATURE_VERSION
    }

    /// CRC32 of version and ordered column names
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Get column index by name (O(n) but columns are few)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Get column name by index
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|s| s.as_str())
    }

    /// Check a recorded column list (e.g. the scaler's fit-time names) against this layout
    pub fn check_columns(&self, recorded: &[String]) -> Result<(), String> {
        if recorded.len() != self.width() {
            return Err(format!(
                "expected {} columns, artifact records {}",
                self.width(),
                recorded.len()
            ));
        }

        match self
            .columns
            .iter()
            .zip(recorded.iter())
            .position(|(expected, actual)| expected != actual)
        {
            Some(i) => Err(format!(
                "column {} is '{}' in the artifact but '{}' in the feature layout",
                i, recorded[i], self.columns[i]
            )),
            None => Ok(()),
        }
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: FEATURE_VERSION,
            hash: self.hash,
            feature_count: self.width(),
            feature_names: self.columns.clone(),
        }
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a column layout
pub fn compute_layout_hash(columns: &[String]) -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    for name in columns {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        let categories = vec!["France".to_string(), "Germany".to_string(), "Spain".to_string()];
        FeatureSchema::new("Geography", &categories)
    }

    #[test]
    fn test_base_column_count() {
        assert_eq!(BASE_COLUMNS.len(), BASE_COLUMN_COUNT);
    }

    #[test]
    fn test_column_order() {
        let schema = schema();
        assert_eq!(schema.width(), 12);
        assert_eq!(
            schema.columns(),
            &[
                "CreditScore", "Gender", "Age", "Tenure", "Balance", "NumOfProducts",
                "HasCrCard", "IsActiveMember", "EstimatedSalary",
                "Geography_France", "Geography_Germany", "Geography_Spain",
            ]
        );
        assert_eq!(
            schema.onehot_columns(),
            &["Geography_France", "Geography_Germany", "Geography_Spain"]
        );
    }

    #[test]
    fn test_width_follows_category_count() {
        let two = FeatureSchema::new("Geography", &["A".to_string(), "B".to_string()]);
        assert_eq!(two.width(), BASE_COLUMN_COUNT + 2);
    }

    #[test]
    fn test_hash_depends_on_order() {
        let a = FeatureSchema::new("Geography", &["France".to_string(), "Spain".to_string()]);
        let b = FeatureSchema::new("Geography", &["Spain".to_string(), "France".to_string()]);
        assert_eq!(a.hash(), a.clone().hash());
        assert_ne!(a.hash(), b.hash());
        assert_ne!(a.hash(), 0);
    }

    #[test]
    fn test_index_lookup() {
        let schema = schema();
        assert_eq!(schema.index_of("CreditScore"), Some(0));
        assert_eq!(schema.index_of("EstimatedSalary"), Some(8));
        assert_eq!(schema.index_of("Geography_Spain"), Some(11));
        assert_eq!(schema.index_of("nonexistent"), None);
        assert_eq!(schema.name_of(1), Some("Gender"));
        assert_eq!(schema.name_of(100), None);
    }

    #[test]
    fn test_check_columns() {
        let schema = schema();
        assert!(schema.check_columns(schema.columns()).is_ok());

        let mut swapped = schema.columns().to_vec();
        swapped.swap(0, 1);
        let err = schema.check_columns(&swapped).unwrap_err();
        assert!(err.contains("column 0"));

        assert!(schema.check_columns(&schema.columns()[..9]).is_err());
    }

    #[test]
    fn test_layout_info() {
        let info = schema().info();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, 12);
        assert_eq!(info.feature_names.len(), 12);
    }
}
