//! Prediction handlers (JSON API)

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use churn_core::ChurnPredictor;

use crate::error::{AppError, AppResult};
use crate::models::{PredictRequest, PredictResponse};
use crate::AppState;

/// Validate → encode → invoke → render for one request
pub fn run_prediction(predictor: &ChurnPredictor, req: &PredictRequest) -> AppResult<PredictResponse> {
    req.validate()?;

    let result = predictor.predict(&req.to_record())?;
    let response = PredictResponse::new(result, req.summary());

    tracing::info!(
        prediction_id = %response.prediction_id,
        probability = response.probability,
        is_churn = response.is_churn,
        engine = %response.engine,
        inference_time_us = response.inference_time_us,
        "Prediction served"
    );

    Ok(response)
}

/// POST /api/v1/predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    run_prediction(&state.predictor, &req).map(Json)
}
