//! API Error Types
//!
//! Maps application errors to HTTP status codes and `{"error", "status"}` bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mindful_core::domain::DomainError;
use mindful_core::error::AppError;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    /// Malformed request (body, path or query)
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

/// HTTP status for an application error
pub fn status_code(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Domain(DomainError::InvalidStatusTransition { .. }) => StatusCode::CONFLICT,
        AppError::Domain(_) => StatusCode::BAD_REQUEST,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::App(err) => {
                let status = status_code(err);
                if status.is_server_error() {
                    error!(error = %err, "Request failed");
                } else {
                    warn!(status = status.as_u16(), error = %err, "Request rejected");
                }
                (status, err.public_message())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::App(AppError::Domain(err))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
