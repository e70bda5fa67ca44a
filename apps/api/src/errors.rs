use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline_client::PipelineError;
use crate::storage::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Pipeline(PipelineError::Upstream { status, message })
                if (400..500).contains(status) && *status != 429 =>
            {
                // The parsing service rejected the file itself; pass its reason on.
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PIPELINE_REJECTED",
                    message.clone(),
                )
            }
            AppError::Pipeline(e) => {
                tracing::error!("Pipeline error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PIPELINE_ERROR",
                    "The resume parsing service is unavailable".to_string(),
                )
            }
            AppError::S3(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "S3_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::S3("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_client_errors_surface_as_unprocessable() {
        let err = AppError::Pipeline(PipelineError::Upstream {
            status: 400,
            message: "Unsupported file type".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_pipeline_outage_is_bad_gateway() {
        let err = AppError::Pipeline(PipelineError::Upstream {
            status: 503,
            message: "down".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
        let err = AppError::Pipeline(PipelineError::Upstream {
            status: 429,
            message: "slow down".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
