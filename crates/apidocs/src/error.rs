//! Startup and request errors.

use apidocs_core::config::ConfigError;
use apidocs_core::{ErrorCode, ErrorResponse, IntoErrorCode};
use apidocs_openapi::OpenApiError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures that stop the server from starting or keep it from running.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid bind address {value:?}: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid documentation path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("failed to initialize logging: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,

    #[error("{name} {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("invalid path parameter: {0}")]
    Path(#[from] PathRejection),

    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("request body failed validation")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Description(#[from] OpenApiError),
}

impl IntoErrorCode for ApiError {
    fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::UserNotFound => ErrorCode::NotFound,
            ApiError::Query(_) => ErrorCode::InvalidInput,
            ApiError::InvalidParameter { .. }
            | ApiError::Path(_)
            | ApiError::Body(_)
            | ApiError::Validation(_) => ErrorCode::Unprocessable,
            ApiError::Description(_) => ErrorCode::Internal,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from_error(&self);
        let body = match &self {
            ApiError::Validation(errors) => match serde_json::to_value(errors) {
                Ok(details) => body.with_details(details),
                Err(_) => body,
            },
            ApiError::Description(err) => {
                tracing::error!(error = %err, "serving API description failed");
                body
            }
            _ => body,
        };
        body.into_response()
    }
}
