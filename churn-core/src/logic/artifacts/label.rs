//! Label mapper - categorical value to a single learned integer code

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::read_json;
use crate::error::{ChurnError, Result};

/// Fitted label mapper. The code of a class is its position in `classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMapper {
    classes: Vec<String>,
}

impl LabelMapper {
    /// Build from learned classes, in code order
    pub fn new(classes: Vec<String>) -> std::result::Result<Self, String> {
        if classes.is_empty() {
            return Err("label mapper has no classes".to_string());
        }
        if let Some(dup) = super::first_duplicate(&classes) {
            return Err(format!("duplicate class '{}'", dup));
        }
        Ok(Self { classes })
    }

    /// Load a `{"classes": [...]}` export
    pub fn load(path: &Path) -> Result<Self> {
        let raw: LabelMapper = read_json(path)?;
        Self::new(raw.classes).map_err(|reason| ChurnError::artifact(path, reason))
    }

    /// Learned classes in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Map a value to its code
    pub fn transform(&self, feature: &str, value: &str) -> Result<u32> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|i| i as u32)
            .ok_or_else(|| ChurnError::unknown_category(feature, value, &self.classes))
    }
}
