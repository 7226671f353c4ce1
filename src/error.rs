//! Error types for the gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::backend::BackendError;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Template asset not found: {0}")]
    TemplateNotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error category, e.g. `not_implemented`
    pub error: String,
    pub message: String,
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Backend(BackendError::Rpc(_)) => StatusCode::BAD_GATEWAY,
            AppError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::InvalidConfig(_) => "configuration_error",
            AppError::Backend(_) => "backend_error",
            AppError::TemplateNotFound(_) | AppError::Template(_) => "template_error",
            AppError::NotImplemented(_) => "not_implemented",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Io(_) | AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
