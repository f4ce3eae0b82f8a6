use crate::core::RecommendError;
use crate::models::ErrorResponse;
use crate::services::StoreError;
use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

/// Errors returned by HTTP handlers, rendered as [`ErrorResponse`] JSON
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    InvalidPayload { kind: &'static str, message: String },

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Recommend(#[from] RecommendError),
}

impl ApiError {
    fn label(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Validation(_) => "validation_failed",
            ApiError::InvalidPayload { kind, .. } => *kind,
            ApiError::Store(_) => "storage_error",
            ApiError::Recommend(RecommendError::Storage(_)) => "storage_error",
            ApiError::Recommend(RecommendError::TimedOut(_)) => "timeout",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Recommend(RecommendError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Recommend(RecommendError::TimedOut(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidPayload {
        kind: "invalid_json",
        message: format!("Invalid JSON: {}", err),
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidPayload {
        kind: "invalid_query",
        message: format!("Invalid query: {}", err),
    }
    .into()
}

/// Handle path parameter errors (e.g. a malformed id)
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidPayload {
        kind: "invalid_path",
        message: format!("Invalid path: {}", err),
    }
    .into()
}
