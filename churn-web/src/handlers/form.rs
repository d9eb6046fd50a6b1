//! HTML form handlers

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Form,
};

use crate::handlers::predict::run_prediction;
use crate::models::PredictRequest;
use crate::views::{render_page, FormOptions, Outcome};
use crate::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let options = form_options(&state);
    let values = PredictRequest::defaults(options.geography, options.gender);

    Html(render_page(options, &values, Outcome::Awaiting))
}

/// POST /predict
///
/// Errors are rendered inside the result column; the status code still
/// reflects the failure.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Form<PredictRequest>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let options = form_options(&state);

    let req = match payload {
        Ok(Form(req)) => req,
        Err(rejection) => {
            tracing::debug!("Rejected form: {}", rejection.body_text());
            let values = PredictRequest::defaults(options.geography, options.gender);
            let message = rejection.body_text();
            return (
                StatusCode::BAD_REQUEST,
                Html(render_page(options, &values, Outcome::Failure(&message))),
            );
        }
    };

    match run_prediction(&state.predictor, &req) {
        Ok(response) => (
            StatusCode::OK,
            Html(render_page(options, &req, Outcome::Prediction(&response))),
        ),
        Err(err) => {
            err.log();
            (
                err.status(),
                Html(render_page(options, &req, Outcome::Failure(err.public_message()))),
            )
        }
    }
}

fn form_options(state: &AppState) -> FormOptions<'_> {
    FormOptions {
        geography: state.predictor.geography_categories(),
        gender: state.predictor.gender_classes(),
    }
}
