//! Prediction request/response models

use std::borrow::{Borrow, Cow};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use churn_core::{CustomerRecord, PredictionResult};

/// Form / JSON input for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, message = "Geography is required"))]
    pub geography: String,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    #[validate(range(min = 18, max = 92, message = "Age must be between 18 and 92"))]
    pub age: u32,

    #[validate(range(min = 300, max = 850, message = "Credit score must be between 300 and 850"))]
    pub credit_score: u32,

    #[validate(
        range(min = 0.0, message = "Balance cannot be negative"),
        custom(function = "finite_amount")
    )]
    pub balance: f64,

    #[validate(
        range(min = 0.0, message = "Estimated salary cannot be negative"),
        custom(function = "finite_amount")
    )]
    pub estimated_salary: f64,

    #[validate(range(min = 0, max = 10, message = "Tenure must be between 0 and 10 years"))]
    pub tenure: u32,

    #[validate(range(min = 1, max = 4, message = "Number of products must be between 1 and 4"))]
    pub num_of_products: u32,

    pub has_cr_card: bool,

    pub is_active_member: bool,
}

impl PredictRequest {
    /// Initial form values; categories default to the first fitted value
    pub fn defaults(geography: &[String], gender: &[String]) -> Self {
        Self {
            geography: geography.first().cloned().unwrap_or_default(),
            gender: gender.first().cloned().unwrap_or_default(),
            age: 35,
            credit_score: 650,
            balance: 60000.0,
            estimated_salary: 50000.0,
            tenure: 3,
            num_of_products: 1,
            has_cr_card: false,
            is_active_member: false,
        }
    }

    pub fn to_record(&self) -> CustomerRecord {
        CustomerRecord {
            credit_score: self.credit_score,
            geography: self.geography.clone(),
            gender: self.gender.clone(),
            age: self.age,
            tenure: self.tenure,
            balance: self.balance,
            num_of_products: self.num_of_products,
            has_cr_card: self.has_cr_card,
            is_active_member: self.is_active_member,
            estimated_salary: self.estimated_salary,
        }
    }

    pub fn summary(&self) -> InputSummary {
        InputSummary {
            geography: self.geography.clone(),
            gender: self.gender.clone(),
            age: self.age,
            credit_score: self.credit_score,
            balance: format_thousands(self.balance),
            salary: format_thousands(self.estimated_salary),
            tenure: format_tenure(self.tenure),
            products: self.num_of_products,
            credit_card: yes_no(self.has_cr_card).to_string(),
            active: yes_no(self.is_active_member).to_string(),
        }
    }
}

/// Echo of the submitted values, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    pub geography: String,
    pub gender: String,
    pub age: u32,
    pub credit_score: u32,
    pub balance: String,
    pub salary: String,
    pub tenure: String,
    pub products: u32,
    pub credit_card: String,
    pub active: String,
}

impl InputSummary {
    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Geography", self.geography.clone()),
            ("Gender", self.gender.clone()),
            ("Age", self.age.to_string()),
            ("Credit Score", self.credit_score.to_string()),
            ("Balance", self.balance.clone()),
            ("Salary", self.salary.clone()),
            ("Tenure", self.tenure.clone()),
            ("Products", self.products.to_string()),
            ("Credit Card", self.credit_card.clone()),
            ("Active", self.active.clone()),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction_id: Uuid,
    pub probability: f64,
    pub is_churn: bool,
    pub verdict: String,
    pub description: String,
    pub percentage: String,
    pub threshold: String,
    pub engine: String,
    pub inference_time_us: u64,
    pub input: InputSummary,
    pub predicted_at: DateTime<Utc>,
}

impl PredictResponse {
    pub fn new(result: PredictionResult, input: InputSummary) -> Self {
        Self {
            prediction_id: Uuid::new_v4(),
            probability: result.probability,
            is_churn: result.verdict.is_churn,
            verdict: result.verdict.label,
            description: result.verdict.description,
            percentage: result.verdict.percentage,
            threshold: result.verdict.threshold,
            engine: result.engine,
            inference_time_us: result.inference_time_us,
            input,
            predicted_at: Utc::now(),
        }
    }
}

/// `range` lets NaN and infinity through; money must be a real number
fn finite_amount<T: Borrow<f64>>(value: T) -> Result<(), ValidationError> {
    if value.borrow().is_finite() {
        return Ok(());
    }

    let mut err = ValidationError::new("finite");
    err.message = Some(Cow::Borrowed("Amount must be a finite number"));
    Err(err)
}

// ============================================================================
// FORMATTING
// ============================================================================

/// `60000.0` -> `"60,000"` (no decimals)
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);

    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && rounded != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `1` -> `"1 yr"`, otherwise `"N yrs"`
pub fn format_tenure(years: u32) -> String {
    format!("{} yr{}", years, if years != 1 { "s" } else { "" })
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictRequest {
        PredictRequest::defaults(&["France".to_string()], &["Female".to_string(), "Male".to_string()])
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(60000.0), "60,000");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-2500.0), "-2,500");
    }

    #[test]
    fn test_format_tenure() {
        assert_eq!(format_tenure(0), "0 yrs");
        assert_eq!(format_tenure(1), "1 yr");
        assert_eq!(format_tenure(3), "3 yrs");
    }

    #[test]
    fn test_defaults_are_valid() {
        let req = request();
        assert_eq!(req.geography, "France");
        assert_eq!(req.gender, "Female");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_range_validation() {
        let mut req = request();
        req.age = 17;
        assert!(req.validate().is_err());

        let mut req = request();
        req.credit_score = 851;
        assert!(req.validate().is_err());

        let mut req = request();
        req.num_of_products = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.tenure = 11;
        assert!(req.validate().is_err());

        let mut req = request();
        req.balance = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        for value in [f64::NAN, f64::INFINITY] {
            let mut req = request();
            req.balance = value;
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("balance"));

            let mut req = request();
            req.estimated_salary = value;
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("estimated_salary"));
        }
    }

    /// Validation bounds match the ranges the form and encoder use
    #[test]
    fn test_bounds_match_record_ranges() {
        use churn_core::logic::features::record::{
            AGE_RANGE, CREDIT_SCORE_RANGE, PRODUCTS_RANGE, TENURE_RANGE,
        };

        type Setter = fn(&mut PredictRequest, u32);
        let fields: [(&str, std::ops::RangeInclusive<u32>, Setter); 4] = [
            ("age", AGE_RANGE, |r, v| r.age = v),
            ("credit_score", CREDIT_SCORE_RANGE, |r, v| r.credit_score = v),
            ("tenure", TENURE_RANGE, |r, v| r.tenure = v),
            ("num_of_products", PRODUCTS_RANGE, |r, v| r.num_of_products = v),
        ];

        for (name, range, set) in fields {
            for value in [*range.start(), *range.end()] {
                let mut req = request();
                set(&mut req, value);
                assert!(req.validate().is_ok(), "{name}={value} should be accepted");
            }

            let mut above = request();
            set(&mut above, range.end() + 1);
            assert!(above.validate().is_err(), "{name} above range accepted");

            if *range.start() > 0 {
                let mut below = request();
                set(&mut below, range.start() - 1);
                assert!(below.validate().is_err(), "{name} below range accepted");
            }
        }
    }

    #[test]
    fn test_summary_rows() {
        let mut req = request();
        req.has_cr_card = true;
        let summary = req.summary();

        assert_eq!(summary.balance, "60,000");
        assert_eq!(summary.salary, "50,000");
        assert_eq!(summary.tenure, "3 yrs");
        assert_eq!(summary.credit_card, "Yes");
        assert_eq!(summary.active, "No");

        let labels: Vec<&str> = summary.rows().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "Geography", "Gender", "Age", "Credit Score", "Balance",
                "Salary", "Tenure", "Products", "Credit Card", "Active",
            ]
        );
    }

    #[test]
    fn test_to_record() {
        let record = request().to_record();
        assert_eq!(record.credit_score, 650);
        assert_eq!(record.age, 35);
        assert_eq!(record.geography, "France");
        assert!(!record.has_cr_card);
    }
}
