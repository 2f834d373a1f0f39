//! Router assembly and serving.

use crate::catalog::{self, ApiInfo, RouteCatalog};
use crate::config::AppConfig;
use crate::error::Error;
use crate::{docs, handlers};
use apidocs_openapi::SchemaAssembler;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state. Cloning is cheap; every clone sees the same cache slot.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub assembler: Arc<SchemaAssembler<RouteCatalog>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let catalog = RouteCatalog::standard(ApiInfo::from_config(&config));
        Self::with_catalog(config, catalog)
    }

    /// State serving the description derived from `catalog`.
    pub fn with_catalog(config: AppConfig, catalog: RouteCatalog) -> Self {
        let assembler = SchemaAssembler::new(catalog, config.metadata.clone());
        Self {
            config: Arc::new(config),
            assembler: Arc::new(assembler),
        }
    }

    pub fn openapi_path(&self) -> &str {
        &self.config.openapi_url
    }

    /// Assemble the description now rather than on the first request.
    ///
    /// A failure is logged and left uncached, so the first request retries.
    pub fn warm_up(&self) -> bool {
        match self.assembler.get_description() {
            Ok(_) => {
                tracing::info!("API description assembled at startup");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "API description not assembled at startup, will retry on request");
                false
            }
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(catalog::HEALTH, get(handlers::health))
        .route(
            catalog::USERS,
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            catalog::USER,
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(catalog::PRODUCTS, get(handlers::list_products));

    if let Some(path) = state.config.openapi_path() {
        router = router.route(path, get(docs::openapi_json));
    }
    if let Some(path) = state.config.docs_path() {
        router = router.merge(docs::swagger_ui(path, state.openapi_path()));
    }
    if let Some(path) = state.config.redoc_path() {
        router = router.merge(docs::redoc(path, state.openapi_path()));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<(), Error> {
    let addr = config.bind;
    let state = AppState::new(config);
    if state.config.eager {
        state.warm_up();
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        openapi = state.config.openapi_path().unwrap_or("disabled"),
        "listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
