//! Model status handler

use axum::{extract::State, Json};

use churn_core::ModelStatus;

use crate::AppState;

/// GET /api/v1/model
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.predictor.status())
}
