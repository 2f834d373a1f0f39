//! The schema assembler: derive once, merge metadata, cache forever.

use crate::Result;
use crate::cache::DescriptionCache;
use crate::error::OpenApiError;
use crate::metadata::Metadata;
use serde_json::Value;
use std::sync::Arc;

/// Upstream collaborator that derives the base description document from the
/// registered routes and models.
///
/// Derivation must be synchronous and bounded; it runs while the assembler's
/// cache slot is locked.
pub trait DescriptionSource: Send + Sync {
    fn derive_base(&self) -> Result<Value>;
}

impl<S: DescriptionSource + ?Sized> DescriptionSource for Arc<S> {
    fn derive_base(&self) -> Result<Value> {
        (**self).derive_base()
    }
}

/// Produces the served description document, computing it at most once.
///
/// The first successful [`get_description`](Self::get_description) derives the
/// base document, merges the [`Metadata`] into it and stores the result. Every
/// later call returns the same `Arc` without touching the source. Failures are
/// reported as [`OpenApiError::DescriptionGenerationFailed`] and are not
/// cached, so the next call retries.
///
/// The document is fixed once stored: metadata changes after that point are
/// never reflected.
#[derive(Debug)]
pub struct SchemaAssembler<S> {
    source: S,
    metadata: Metadata,
    cache: DescriptionCache,
}

impl<S: DescriptionSource> SchemaAssembler<S> {
    pub fn new(source: S, metadata: Metadata) -> Self {
        Self {
            source,
            metadata,
            cache: DescriptionCache::new(),
        }
    }

    /// The assembled document, computed on first use.
    pub fn get_description(&self) -> Result<Arc<Value>> {
        self.cache.get_or_try_init(|| self.assemble())
    }

    /// Whether the document has been computed and stored.
    pub fn is_cached(&self) -> bool {
        self.cache.is_populated()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn assemble(&self) -> Result<Value> {
        let result = self.source.derive_base().and_then(|mut doc| {
            self.metadata.merge_into(&mut doc)?;
            Ok(doc)
        });

        match result {
            Ok(doc) => {
                tracing::info!(
                    tags = self.metadata.tags.len(),
                    servers = self.metadata.servers.len(),
                    security_schemes = self.metadata.security_schemes.len(),
                    "assembled API description"
                );
                Ok(doc)
            }
            Err(err) => {
                tracing::warn!(error = %err, "API description generation failed");
                Err(OpenApiError::generation_failed(err))
            }
        }
    }
}
