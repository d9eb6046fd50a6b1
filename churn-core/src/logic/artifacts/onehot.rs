//! One-hot mapper - one binary column per learned category

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::read_json;
use crate::error::{ChurnError, Result};

/// Fitted one-hot mapper for a single categorical feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotMapper {
    /// Input feature name, used as the output column prefix
    feature: String,
    /// Learned categories, in column order
    categories: Vec<String>,
}

impl OneHotMapper {
    pub fn new(feature: impl Into<String>, categories: Vec<String>) -> std::result::Result<Self, String> {
        let feature = feature.into();
        if feature.is_empty() {
            return Err("one-hot mapper has no feature name".to_string());
        }
        if categories.is_empty() {
            return Err(format!("one-hot mapper for {} has no categories", feature));
        }
        if let Some(dup) = super::first_duplicate(&categories) {
            return Err(format!("duplicate category '{}'", dup));
        }
        Ok(Self { feature, categories })
    }

    /// Load a `{"feature": "...", "categories": [...]}` export
    pub fn load(path: &Path) -> Result<Self> {
        let raw: OneHotMapper = read_json(path)?;
        Self::new(raw.feature, raw.categories).map_err(|reason| ChurnError::artifact(path, reason))
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Learned categories in column order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Output column names: `<feature>_<category>`
    pub fn feature_names_out(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("{}_{}", self.feature, c))
            .collect()
    }

    /// Expand a value into one column per category
    pub fn transform(&self, value: &str) -> Result<Vec<f64>> {
        let hot = self
            .categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| ChurnError::unknown_category(&self.feature, value, &self.categories))?;

        Ok((0..self.categories.len())
            .map(|i| if i == hot { 1.0 } else { 0.0 })
            .collect())
    }
}
