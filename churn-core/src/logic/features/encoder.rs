//! Feature Encoder - CustomerRecord to scaled model input
//!
//! Áp dụng đúng các transform đã dùng lúc training, theo đúng thứ tự cột.

use super::layout::FeatureSchema;
use super::record::CustomerRecord;
use super::vector::EncodedFeatureVector;
use crate::error::{ChurnError, Result};
use crate::logic::artifacts::{LabelMapper, OneHotMapper, StandardScaler};

/// Column name used when reporting an unknown gender
const GENDER_FEATURE: &str = "Gender";

/// Fitted transforms bound to the layout they produce
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
    gender: LabelMapper,
    geography: OneHotMapper,
    scaler: StandardScaler,
}

impl FeatureEncoder {
    /// Bind the transforms to `schema`.
    ///
    /// Fails if the scaler width differs from the layout, or if the scaler
    /// recorded fit-time column names that differ from the layout's order.
    pub fn new(
        schema: FeatureSchema,
        gender: LabelMapper,
        geography: OneHotMapper,
        scaler: StandardScaler,
    ) -> std::result::Result<Self, String> {
        if schema.onehot_columns() != geography.feature_names_out().as_slice() {
            return Err(format!(
                "one-hot columns {:?} do not match the feature layout",
                geography.feature_names_out()
            ));
        }

        if scaler.width() != schema.width() {
            return Err(format!(
                "scaler was fitted on {} columns, feature layout has {}",
                scaler.width(),
                schema.width()
            ));
        }

        match scaler.feature_names() {
            Some(names) => schema.check_columns(names)?,
            None => log::warn!(
                "Scaler does not record its column names; column order is unchecked"
            ),
        }

        Ok(Self {
            schema,
            gender,
            geography,
            scaler,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn gender_classes(&self) -> &[String] {
        self.gender.classes()
    }

    pub fn geography_categories(&self) -> &[String] {
        self.geography.categories()
    }

    /// Unscaled row in layout order
    pub fn assemble_row(&self, record: &CustomerRecord) -> Result<Vec<f64>> {
        let gender_code = self.gender.transform(GENDER_FEATURE, &record.gender)?;
        let geography = self.geography.transform(&record.geography)?;

        let mut row = Vec::with_capacity(self.schema.width());
        row.extend_from_slice(&record.scalar_columns(gender_code));
        row.extend(geography);

        Ok(row)
    }

    /// Assemble and scale.
    ///
    /// Every column must be finite both before and after scaling; a NaN or
    /// infinity would otherwise reach the model and come back as a verdict.
    pub fn encode(&self, record: &CustomerRecord) -> Result<EncodedFeatureVector> {
        let row = self.assemble_row(record)?;
        self.check_finite(row.iter().copied(), "not a finite number")?;

        let scaled = self.scaler.transform(&row)?;
        self.check_finite(scaled.iter().map(|&v| v as f64), "out of range after scaling")?;

        Ok(EncodedFeatureVector::new(&self.schema, scaled))
    }

    fn check_finite(&self, values: impl IntoIterator<Item = f64>, reason: &str) -> Result<()> {
        match values.into_iter().position(|v| !v.is_finite()) {
            Some(i) => Err(ChurnError::InvalidValue {
                column: self.schema.name_of(i).unwrap_or("<unknown>").to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}
