//! Description document and documentation pages.

use crate::app::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::Router;
use axum::extract::State;
use serde_json::Value;
use std::sync::Arc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::{Config, SwaggerUi};

/// Serve the assembled description document, assembling it on first use.
pub async fn openapi_json(State(state): State<AppState>) -> Result<Json<Arc<Value>>, ApiError> {
    // The std Mutex blocks this worker only while the first caller assembles;
    // derivation is bounded and in-memory.
    let doc = state.assembler.get_description()?;
    Ok(Json(doc))
}

/// Swagger UI at `docs_path`, loading the document from `openapi_url`.
pub fn swagger_ui(docs_path: &str, openapi_url: &str) -> Router<AppState> {
    SwaggerUi::new(docs_path.to_string())
        .config(Config::from(openapi_url.to_string()))
        .into()
}

/// ReDoc at `redoc_path`. The spec is given as a URL, so the page never
/// embeds the document and does not force assembly.
pub fn redoc(redoc_path: &str, openapi_url: &str) -> Router<AppState> {
    Redoc::with_url(redoc_path.to_string(), Value::String(openapi_url.to_string())).into()
}
