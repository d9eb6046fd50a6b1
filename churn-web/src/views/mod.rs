//! Server-rendered HTML for the churn form
//!
//! Trang gồm hai cột: form bên trái, kết quả (hoặc placeholder) bên phải.

mod form;
mod result;

use churn_core::constants::{APP_NAME, APP_VERSION};

use crate::models::{PredictRequest, PredictResponse};

pub use form::render_form;
pub use result::{render_awaiting, render_error, render_result};

const STYLESHEET: &str = include_str!("../../static/style.css");

/// What the right-hand column shows
#[derive(Debug)]
pub enum Outcome<'a> {
    Awaiting,
    Prediction(&'a PredictResponse),
    Failure(&'a str),
}

/// Choices offered by the dropdowns
#[derive(Debug, Clone, Copy)]
pub struct FormOptions<'a> {
    pub geography: &'a [String],
    pub gender: &'a [String],
}

/// Full page: header, form (with `values` selected) and outcome column
pub fn render_page(options: FormOptions<'_>, values: &PredictRequest, outcome: Outcome<'_>) -> String {
    let output = match outcome {
        Outcome::Awaiting => render_awaiting(),
        Outcome::Prediction(response) => render_result(response),
        Outcome::Failure(message) => render_error(message),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<main>
<div class="app-header">
    <div>
        <div class="app-title">Churn<span>Intelligence</span></div>
        <div class="app-sub">Neural network-powered customer attrition analysis</div>
    </div>
    <div class="app-badge">v{version} Live</div>
</div>
<div class="columns">
    <section>
{form}
    </section>
    <section>
        <div class="section-label">Prediction Output</div>
{output}
    </section>
</div>
</main>
</body>
</html>"#,
        title = escape_html(APP_NAME),
        style = STYLESHEET,
        version = escape_html(APP_VERSION),
        form = render_form(options, values),
        output = output,
    )
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> (Vec<String>, Vec<String>) {
        (
            vec!["France".into(), "Germany".into(), "Spain".into()],
            vec!["Female".into(), "Male".into()],
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("O'Brien"), "O&#39;Brien");
    }

    #[test]
    fn test_awaiting_page() {
        let (geo, gender) = categories();
        let options = FormOptions { geography: &geo, gender: &gender };
        let values = PredictRequest::defaults(&geo, &gender);

        let html = render_page(options, &values, Outcome::Awaiting);
        assert!(html.contains("Awaiting input"));
        assert!(html.contains("Fill in the form and run prediction"));
        assert!(html.contains(r#"<option value="Germany">Germany</option>"#));
        assert!(!html.contains("result-panel"));
    }

    #[test]
    fn test_failure_page_escapes_message() {
        let (geo, gender) = categories();
        let options = FormOptions { geography: &geo, gender: &gender };
        let values = PredictRequest::defaults(&geo, &gender);

        let html = render_page(options, &values, Outcome::Failure("Unknown Geography category '<x>'"));
        assert!(html.contains("result-panel error"));
        assert!(html.contains("&#39;&lt;x&gt;&#39;"));
        assert!(!html.contains("Awaiting input"));
    }
}
