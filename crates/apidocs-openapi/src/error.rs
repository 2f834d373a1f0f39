//! Error types for OpenAPI assembly.

use thiserror::Error;

/// Errors that can occur while deriving or assembling a description document.
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// Schema conflict: same name, different definitions.
    #[error("Schema conflict for '{name}': defined differently in multiple specs")]
    SchemaConflict { name: String },

    /// Invalid OpenAPI document structure.
    #[error("Invalid OpenAPI spec: {message}")]
    InvalidSpec { message: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Deriving or merging the description document failed. Nothing was cached.
    #[error("description generation failed: {0}")]
    DescriptionGenerationFailed(#[source] Box<OpenApiError>),
}

impl OpenApiError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        OpenApiError::InvalidSpec {
            message: message.into(),
        }
    }

    /// Wrap a derivation or merge failure.
    ///
    /// An error that is already a generation failure is returned unchanged.
    pub fn generation_failed(err: OpenApiError) -> Self {
        match err {
            err @ OpenApiError::DescriptionGenerationFailed(_) => err,
            other => OpenApiError::DescriptionGenerationFailed(Box::new(other)),
        }
    }
}
