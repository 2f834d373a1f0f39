//! OpenAPI document assembly for apidocs.
//!
//! A base document is derived from registered routes and models (see
//! [`OpenApiBuilder`]), static [`Metadata`] (tags, servers, security schemes)
//! is merged into it, and the merged document is cached for the life of the
//! process by [`SchemaAssembler`].
//!
//! # Example
//!
//! ```ignore
//! use apidocs_openapi::{Metadata, SchemaAssembler, Tag};
//!
//! let metadata = Metadata::new().tag(Tag::new("Users").with_description("Operations with users"));
//! let assembler = SchemaAssembler::new(catalog, metadata);
//!
//! let doc = assembler.get_description()?;
//! assert!(assembler.is_cached());
//! ```

mod assembler;
mod builder;
mod cache;
mod error;
mod metadata;
mod types;

pub use assembler::{DescriptionSource, SchemaAssembler};
pub use builder::{OPENAPI_VERSION, OpenApiBuilder};
pub use cache::DescriptionCache;
pub use error::OpenApiError;
pub use metadata::{ApiKeyLocation, Metadata, SecurityScheme, Server, Tag};
pub use types::*;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;
