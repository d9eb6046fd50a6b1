//! Prediction output column

use std::fmt::Write;

use super::escape_html;
use crate::models::{InputSummary, PredictResponse};

pub fn render_result(response: &PredictResponse) -> String {
    let css = if response.is_churn { "churn" } else { "safe" };

    let mut html = format!(
        r#"<div class="result-panel {css}">
    <div class="result-verdict {css}">{verdict}</div>
    <div class="result-desc">{desc}</div>
    <div class="prob-container">
        <div class="prob-header">
            <div class="prob-label">Churn Probability</div>
            <div class="prob-value {css}">{pct}</div>
        </div>
        <div class="prob-bar-track">
            <div class="prob-bar-fill {css}" style="width:{pct}"></div>
        </div>
        <div class="threshold-row">
            <div class="threshold-badge">Threshold: {threshold}</div>
        </div>
    </div>
</div>
"#,
        css = css,
        verdict = escape_html(&response.verdict),
        desc = escape_html(&response.description),
        pct = escape_html(&response.percentage),
        threshold = escape_html(&response.threshold),
    );

    html.push_str("<div class=\"section-label\">Input Summary</div>\n");
    html.push_str(&render_summary(&response.input));
    html
}

fn render_summary(summary: &InputSummary) -> String {
    let mut html = String::from("<div class=\"card\">\n");
    for (key, value) in summary.rows() {
        let _ = writeln!(
            html,
            "<div class=\"summary-row\"><span class=\"summary-key\">{}</span><span class=\"summary-value\">{}</span></div>",
            key,
            escape_html(&value)
        );
    }
    html.push_str("</div>\n");
    html
}

pub fn render_awaiting() -> String {
    r#"<div class="awaiting">
    <div class="awaiting-title">Awaiting input</div>
    <div class="awaiting-hint">Fill in the form and run prediction</div>
</div>
"#
    .to_string()
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="result-panel error">
    <div class="result-verdict error">Prediction unavailable</div>
    <div class="result-desc">{}</div>
</div>
"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictRequest;
    use churn_core::{PredictionResult, Verdict};

    fn response(probability: f64) -> PredictResponse {
        let geo = vec!["France".to_string()];
        let gender = vec!["Male".to_string()];
        let mut request = PredictRequest::defaults(&geo, &gender);
        request.has_cr_card = true;
        request.is_active_member = true;

        let result = PredictionResult {
            probability,
            verdict: Verdict::from_probability(probability),
            inference_time_us: 12,
            engine: "fixed".to_string(),
        };
        PredictResponse::new(result, request.summary())
    }

    #[test]
    fn test_churn_panel() {
        let html = render_result(&response(0.73));
        assert!(html.contains(r#"<div class="result-verdict churn">Likely to Churn</div>"#));
        assert!(html.contains(r#"<div class="prob-value churn">73.0%</div>"#));
        assert!(html.contains("width:73.0%"));
        assert!(html.contains("Threshold: 50%"));
        assert!(html.contains("Immediate retention action is recommended."));
    }

    #[test]
    fn test_safe_panel_and_summary() {
        let html = render_result(&response(0.5));
        assert!(html.contains("result-panel safe"));
        assert!(html.contains("Low Churn Risk"));
        assert!(html.contains("50.0%"));
        assert!(html.contains(r#"<span class="summary-key">Balance</span><span class="summary-value">60,000</span>"#));
        assert!(html.contains(r#"<span class="summary-key">Tenure</span><span class="summary-value">3 yrs</span>"#));
        assert!(html.contains(r#"<span class="summary-key">Credit Card</span><span class="summary-value">Yes</span>"#));
    }
}
