//! Verdict Threshold
//!
//! Ngưỡng quyết định churn cố định ở 0.5, không cấu hình lúc runtime.

use serde::{Deserialize, Serialize};

/// Decision threshold. `p > DECISION_THRESHOLD` is churn; exactly 0.5 is safe.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Threshold as shown next to the probability bar
pub const THRESHOLD_LABEL: &str = "50%";

const CHURN_LABEL: &str = "Likely to Churn";
const SAFE_LABEL: &str = "Low Churn Risk";

const CHURN_DESCRIPTION: &str =
    "This customer shows elevated attrition signals. Immediate retention action is recommended.";
const SAFE_DESCRIPTION: &str =
    "This customer appears stable. Standard engagement cadence is sufficient.";

/// Display-ready verdict for one probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub probability: f64,
    pub is_churn: bool,
    /// "Likely to Churn" / "Low Churn Risk"
    pub label: String,
    pub description: String,
    /// One decimal place, e.g. "87.3%"
    pub percentage: String,
    /// Width of the probability bar (CSS length)
    pub bar_width: String,
    /// "churn" / "safe"
    pub css_class: String,
    pub threshold: String,
}

impl Verdict {
    /// Apply the fixed threshold to `probability`
    pub fn from_probability(probability: f64) -> Self {
        let is_churn = is_churn(probability);
        let percentage = format_percentage(probability);

        let (label, description, css_class) = if is_churn {
            (CHURN_LABEL, CHURN_DESCRIPTION, "churn")
        } else {
            (SAFE_LABEL, SAFE_DESCRIPTION, "safe")
        };

        Self {
            probability,
            is_churn,
            label: label.to_string(),
            description: description.to_string(),
            bar_width: percentage.clone(),
            percentage,
            css_class: css_class.to_string(),
            threshold: THRESHOLD_LABEL.to_string(),
        }
    }
}

/// Strict comparison against the decision threshold
pub fn is_churn(probability: f64) -> bool {
    probability > DECISION_THRESHOLD
}

/// `0.8734` -> `"87.3%"`
pub fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        let at = Verdict::from_probability(0.5);
        assert!(!at.is_churn);
        assert_eq!(at.label, "Low Churn Risk");

        let above = Verdict::from_probability(0.5000001);
        assert!(above.is_churn);
        assert_eq!(above.label, "Likely to Churn");
    }

    #[test]
    fn test_percentage_formatting() {
        assert_eq!(format_percentage(0.8734), "87.3%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(1.0), "100.0%");
    }

    #[test]
    fn test_churn_verdict_fields() {
        let v = Verdict::from_probability(0.73);
        assert!(v.is_churn);
        assert_eq!(v.percentage, "73.0%");
        assert_eq!(v.bar_width, "73.0%");
        assert_eq!(v.css_class, "churn");
        assert_eq!(v.threshold, "50%");
        assert!(v.description.starts_with("This customer shows elevated attrition signals."));
    }

    #[test]
    fn test_safe_verdict_fields() {
        let v = Verdict::from_probability(0.12);
        assert!(!v.is_churn);
        assert_eq!(v.label, "Low Churn Risk");
        assert_eq!(v.css_class, "safe");
        assert_eq!(
            v.description,
            "This customer appears stable. Standard engagement cadence is sufficient."
        );
    }
}
