//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use churn_core::ChurnError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    Validation(String),

    /// Category outside the fitted set
    #[error("{0}")]
    UnknownCategory(String),

    /// Model could not produce a usable probability
    #[error("{0}")]
    Inference(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownCategory(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Inference(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show the client
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::UnknownCategory(msg) => msg.as_str(),
            AppError::Inference(_) => "Prediction failed",
            AppError::Internal(_) => "Internal server error",
        }
    }

    /// Log server-side faults; client errors are only traced at debug
    pub fn log(&self) {
        match self {
            AppError::Inference(msg) => tracing::error!("Inference error: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            other => tracing::debug!("Rejected request: {}", other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let body = Json(json!({
            "error": self.public_message(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ChurnError> for AppError {
    fn from(err: ChurnError) -> Self {
        match err {
            ChurnError::UnknownCategory { .. } => AppError::UnknownCategory(err.to_string()),
            ChurnError::InvalidValue { .. } => AppError::Validation(err.to_string()),
            ChurnError::ModelInvocation(_) | ChurnError::LayoutMismatch { .. } => {
                AppError::Inference(err.to_string())
            }
            ChurnError::ArtifactLoad { .. } => AppError::Internal(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect();

        AppError::Validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_churn_error_status_mapping() {
        let unknown: AppError =
            ChurnError::unknown_category("Geography", "Atlantis", &["France".to_string()]).into();
        assert_eq!(unknown.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(unknown.public_message().contains("Atlantis"));

        let model: AppError = ChurnError::ModelInvocation("bad shape".into()).into();
        assert_eq!(model.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(model.public_message(), "Prediction failed");

        let invalid: AppError = ChurnError::InvalidValue {
            column: "Balance".into(),
            reason: "not a finite number".into(),
        }
        .into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert!(invalid.public_message().contains("Balance"));

        let artifact: AppError = ChurnError::artifact("/tmp/scaler.json", "missing").into();
        assert_eq!(artifact.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_message_names_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct AgeOnly {
            #[validate(range(min = 18, max = 92, message = "out of range"))]
            age: u32,
        }

        let err: AppError = AgeOnly { age: 5 }.validate().unwrap_err().into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "age: out of range");
    }
}
