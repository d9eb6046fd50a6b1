//! Customer form

use std::fmt::Write;

use churn_core::logic::features::record::{AGE_RANGE, CREDIT_SCORE_RANGE, PRODUCTS_RANGE, TENURE_RANGE};

use super::{escape_html, FormOptions};
use crate::models::PredictRequest;

/// Step of the balance and salary inputs
const MONEY_STEP: u32 = 500;

pub fn render_form(options: FormOptions<'_>, values: &PredictRequest) -> String {
    let mut html = String::new();

    html.push_str("<form method=\"post\" action=\"/predict\">\n");

    html.push_str("<div class=\"section-label\">Customer Profile</div>\n<div class=\"row three\">\n");
    html.push_str(&select("geography", "Geography", options.geography, &values.geography));
    html.push_str(&select("gender", "Gender", options.gender, &values.gender));
    html.push_str(&slider("age", "Age", *AGE_RANGE.start(), *AGE_RANGE.end(), values.age));
    html.push_str("</div>\n");

    html.push_str("<div class=\"section-label\">Financials</div>\n<div class=\"row three\">\n");
    html.push_str(&number(
        "credit_score",
        "Credit Score",
        *CREDIT_SCORE_RANGE.start(),
        Some(*CREDIT_SCORE_RANGE.end()),
        1,
        values.credit_score as f64,
    ));
    html.push_str(&number("balance", "Balance", 0, None, MONEY_STEP, values.balance));
    html.push_str(&number(
        "estimated_salary",
        "Estimated Salary",
        0,
        None,
        MONEY_STEP,
        values.estimated_salary,
    ));
    html.push_str("</div>\n");

    html.push_str("<div class=\"section-label\">Relationship</div>\n<div class=\"row four\">\n");
    html.push_str(&slider("tenure", "Tenure (yrs)", *TENURE_RANGE.start(), *TENURE_RANGE.end(), values.tenure));
    html.push_str(&slider(
        "num_of_products",
        "Products",
        *PRODUCTS_RANGE.start(),
        *PRODUCTS_RANGE.end(),
        values.num_of_products,
    ));
    html.push_str(&yes_no("has_cr_card", "Credit Card", values.has_cr_card));
    html.push_str(&yes_no("is_active_member", "Active Member", values.is_active_member));
    html.push_str("</div>\n");

    html.push_str("<button type=\"submit\">Run Prediction</button>\n</form>\n");
    html
}

fn select(name: &str, label: &str, choices: &[String], selected: &str) -> String {
    let mut html = format!(
        "<div><label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\n"
    );

    for choice in choices {
        let value = escape_html(choice);
        let marker = if choice == selected { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{value}\"{marker}>{value}</option>");
    }

    html.push_str("</select></div>\n");
    html
}

fn slider(name: &str, label: &str, min: u32, max: u32, value: u32) -> String {
    format!(
        "<div><label for=\"{name}\">{label}</label>\n\
         <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" value=\"{value}\" \
         oninput=\"this.nextElementSibling.value=this.value\">\n\
         <output>{value}</output></div>\n"
    )
}

fn number(name: &str, label: &str, min: u32, max: Option<u32>, step: u32, value: f64) -> String {
    let max = max.map(|m| format!(" max=\"{m}\"")).unwrap_or_default();
    format!(
        "<div><label for=\"{name}\">{label}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\"{max} step=\"{step}\" value=\"{value}\"></div>\n"
    )
}

fn yes_no(name: &str, label: &str, value: bool) -> String {
    let (no, yes) = if value { ("", " selected") } else { (" selected", "") };
    format!(
        "<div><label for=\"{name}\">{label}</label>\n\
         <select id=\"{name}\" name=\"{name}\">\n\
         <option value=\"false\"{no}>No</option>\n\
         <option value=\"true\"{yes}>Yes</option>\n\
         </select></div>\n"
    )
}
