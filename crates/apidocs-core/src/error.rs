//! Error codes and the JSON error body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol-agnostic error code that maps to an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 400 Bad Request
    InvalidInput,
    /// 404 Not Found
    NotFound,
    /// 422 Unprocessable Entity
    Unprocessable,
    /// 500 Internal Server Error
    Internal,
}

impl ErrorCode {
    /// Convert to HTTP status code
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Unprocessable => 422,
            ErrorCode::Internal => 500,
        }
    }
}

/// Trait for converting errors to protocol-agnostic error codes.
pub trait IntoErrorCode {
    /// Get the error code for this error
    fn error_code(&self) -> ErrorCode;

    /// Get a human-readable message
    fn message(&self) -> String;
}

/// The JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn from_error<E: IntoErrorCode + ?Sized>(err: &E) -> Self {
        Self::new(err.error_code(), err.message())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.code.http_status())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::Unprocessable.http_status(), 422);
        assert_eq!(ErrorCode::Internal.http_status(), 500);
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::new(ErrorCode::NotFound, "User not found");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"code": "NOT_FOUND", "message": "User not found"})
        );

        let body = body.with_details(json!({"user_id": 7}));
        assert_eq!(serde_json::to_value(&body).unwrap()["details"]["user_id"], 7);
    }
}
