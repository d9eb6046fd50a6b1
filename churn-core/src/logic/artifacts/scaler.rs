//! Standard scaler - per-column `(x - mean) / scale`

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::read_json;
use crate::error::{ChurnError, Result};

/// Fitted standardization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names seen at fit time, when the export recorded them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(
        feature_names: Option<Vec<String>>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    ) -> std::result::Result<Self, String> {
        if mean.is_empty() {
            return Err("scaler has no columns".to_string());
        }
        if mean.len() != scale.len() {
            return Err(format!(
                "mean has {} columns but scale has {}",
                mean.len(),
                scale.len()
            ));
        }
        if let Some(names) = &feature_names {
            if names.len() != mean.len() {
                return Err(format!(
                    "{} feature names for {} columns",
                    names.len(),
                    mean.len()
                ));
            }
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("mean of column {} is not finite", i));
        }
        if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(format!("scale of column {} is zero or not finite", i));
        }

        Ok(Self { feature_names, mean, scale })
    }

    /// Load a `{"feature_names": [...], "mean": [...], "scale": [...]}` export
    pub fn load(path: &Path) -> Result<Self> {
        let raw: StandardScaler = read_json(path)?;
        Self::new(raw.feature_names, raw.mean, raw.scale)
            .map_err(|reason| ChurnError::artifact(path, reason))
    }

    /// Number of columns the scaler was fitted on
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Standardize one row
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f32>> {
        if row.len() != self.width() {
            return Err(ChurnError::ModelInvocation(format!(
                "scaler expects {} columns, got {}",
                self.width(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| ((x - mean) / scale) as f32)
            .collect())
    }
}
