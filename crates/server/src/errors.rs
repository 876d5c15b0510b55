use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error returned by request handlers; always rendered as `{"error", "code"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: u16,
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: e.to_string(), code: e.code() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.code, error = %self.message, "request failed");
        }
        (self.status, Json(ErrorBody { error: self.message, code: self.code })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database error: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
