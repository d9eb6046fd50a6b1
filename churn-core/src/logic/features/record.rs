//! Customer Record - raw input to the encoder

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted credit score range
pub const CREDIT_SCORE_RANGE: RangeInclusive<u32> = 300..=850;

/// Accepted age range
pub const AGE_RANGE: RangeInclusive<u32> = 18..=92;

/// Accepted tenure range (years)
pub const TENURE_RANGE: RangeInclusive<u32> = 0..=10;

/// Accepted number-of-products range
pub const PRODUCTS_RANGE: RangeInclusive<u32> = 1..=4;

/// One customer, as entered in the form.
///
/// Built per request and dropped after the prediction. Categorical fields
/// hold the raw category names; they are checked against the fitted sets
/// by the encoder, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub credit_score: u32,
    pub geography: String,
    pub gender: String,
    pub age: u32,
    pub tenure: u32,
    pub balance: f64,
    pub num_of_products: u32,
    pub has_cr_card: bool,
    pub is_active_member: bool,
    pub estimated_salary: f64,
}

impl CustomerRecord {
    /// Scalar columns in layout order, with gender already mapped to its code
    pub(crate) fn scalar_columns(&self, gender_code: u32) -> [f64; super::layout::BASE_COLUMN_COUNT] {
        [
            self.credit_score as f64,
            gender_code as f64,
            self.age as f64,
            self.tenure as f64,
            self.balance,
            self.num_of_products as f64,
            flag(self.has_cr_card),
            flag(self.is_active_member),
            self.estimated_salary,
        ]
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
