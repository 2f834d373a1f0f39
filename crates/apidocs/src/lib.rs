//! apidocs - a placeholder users API with a cached OpenAPI description.
//!
//! The router serves a handful of mock endpoints (health, users, products)
//! plus the API description document and two documentation pages:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | health check |
//! | GET, POST | `/users` | list (`skip`, `limit`) / create |
//! | GET, PUT, DELETE | `/users/{user_id}` | get / update / delete |
//! | GET | `/products` | list (`category`) |
//! | GET | `/openapi.json` | assembled description |
//! | GET | `/docs`, `/redoc` | Swagger UI / ReDoc |
//!
//! # Description document
//!
//! The base document is derived from the [`RouteCatalog`] (registered routes
//! and model schemas). The configured tags, servers and security schemes are
//! merged in, and the result is cached in the shared [`AppState`] for the life
//! of the process:
//!
//! ```ignore
//! let state = AppState::new(AppConfig::default());
//! let app = apidocs::router(state);
//! // GET /openapi.json -> computed once, then served from the cache slot
//! ```
//!
//! Configuration is read once at startup (see [`config`]); changing it later
//! does not affect an already assembled document.

pub mod app;
pub mod catalog;
pub mod config;
pub mod docs;
mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod telemetry;

pub use app::{AppState, router, serve};
pub use catalog::{ApiInfo, RouteCatalog};
pub use config::AppConfig;
pub use error::{ApiError, Error};

// Re-export the assembly types used in the public API
pub use apidocs_openapi::{DescriptionSource, Metadata, OpenApiError, SchemaAssembler};
