//! Application configuration.
//!
//! Loaded once at startup from an optional TOML file, then overridden by the
//! environment (`APIDOCS_BIND`) and the command line. Never reloaded.
//!
//! ```toml
//! title = "My API"
//! version = "1.0.0"
//! bind = "127.0.0.1:8000"
//! docs_url = ""            # empty disables the page
//!
//! [log]
//! format = "json"
//!
//! [[metadata.tags]]
//! name = "Users"
//! description = "Operations with users"
//!
//! [metadata.security_schemes.BearerAuth]
//! type = "http"
//! scheme = "bearer"
//! bearerFormat = "JWT"
//! ```

use crate::catalog;
use crate::error::Error;
use apidocs_core::config::{env_var, load_toml};
use apidocs_openapi::{Metadata, SecurityScheme, Server, Tag};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const BIND_ENV: &str = "APIDOCS_BIND";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub description: String,
    pub version: String,
    /// Path serving the description document. Empty disables it, and with it
    /// both documentation pages.
    pub openapi_url: String,
    /// Swagger UI page. Empty disables it.
    pub docs_url: String,
    /// ReDoc page. Empty disables it.
    pub redoc_url: String,
    pub bind: SocketAddr,
    /// Assemble the description document at startup instead of on first request.
    pub eager: bool,
    pub log: LogConfig,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Filter directives used when `RUST_LOG` is unset.
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "My API".to_string(),
            description: "API for managing users and products".to_string(),
            version: "1.0.0".to_string(),
            openapi_url: "/openapi.json".to_string(),
            docs_url: "/docs".to_string(),
            redoc_url: "/redoc".to_string(),
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            eager: false,
            log: LogConfig::default(),
            metadata: default_metadata(),
        }
    }
}

fn default_metadata() -> Metadata {
    Metadata::new()
        .tag(Tag::new(catalog::TAG_USERS).with_description("Operations with users"))
        .tag(Tag::new(catalog::TAG_PRODUCTS).with_description("Operations with products"))
        .tag(Tag::new(catalog::TAG_HEALTH).with_description("Health check endpoints"))
        .server(Server::new("http://localhost:8000").with_description("Development server"))
        .server(Server::new("https://api.example.com").with_description("Production server"))
        .security_scheme("BearerAuth", SecurityScheme::bearer("JWT"))
}

impl AppConfig {
    /// Load from `path` (or defaults), apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => load_toml(path)?,
            None => Self::default(),
        };

        if let Some(bind) = env_var(BIND_ENV) {
            config.bind = parse_bind(&bind)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject documentation paths axum cannot route or that shadow API routes.
    pub fn validate(&self) -> Result<(), Error> {
        let doc_paths = [&self.openapi_url, &self.docs_url, &self.redoc_url];
        let enabled: Vec<&str> = doc_paths
            .iter()
            .map(|p| p.as_str())
            .filter(|p| !p.is_empty())
            .collect();

        for (i, path) in enabled.iter().enumerate() {
            if let Some(reason) = malformed(path) {
                return Err(Error::InvalidPath {
                    path: path.to_string(),
                    reason,
                });
            }
            if catalog::ROUTE_PATHS.contains(path) {
                return Err(Error::InvalidPath {
                    path: path.to_string(),
                    reason: "collides with an API route",
                });
            }
            if enabled[..i].contains(path) {
                return Err(Error::InvalidPath {
                    path: path.to_string(),
                    reason: "used for more than one documentation endpoint",
                });
            }
        }

        // Swagger UI owns every path below its own.
        if let Some(docs) = self.docs_path() {
            let prefix = format!("{docs}/");
            for path in [self.openapi_path(), self.redoc_path()].into_iter().flatten() {
                if path.starts_with(&prefix) {
                    return Err(Error::InvalidPath {
                        path: path.to_string(),
                        reason: "nested under the Swagger UI path",
                    });
                }
            }
        }
        Ok(())
    }

    pub fn openapi_path(&self) -> Option<&str> {
        non_empty(&self.openapi_url)
    }

    /// Documentation pages need the description path to load from.
    pub fn docs_path(&self) -> Option<&str> {
        self.openapi_path().and(non_empty(&self.docs_url))
    }

    pub fn redoc_path(&self) -> Option<&str> {
        self.openapi_path().and(non_empty(&self.redoc_url))
    }
}

pub fn parse_bind(value: &str) -> Result<SocketAddr, Error> {
    value.trim().parse().map_err(|source| Error::InvalidBind {
        value: value.to_string(),
        source,
    })
}

/// Why `path` cannot be registered as a static route, if it cannot.
fn malformed(path: &str) -> Option<&'static str> {
    if !path.starts_with('/') {
        return Some("must start with '/'");
    }
    if path.len() > 1 && path.ends_with('/') {
        return Some("must not end with '/'");
    }
    if path.contains("//") {
        return Some("must not contain empty segments");
    }
    if path
        .chars()
        .any(|c| matches!(c, '{' | '}' | '*' | '?' | '#') || c.is_whitespace())
    {
        return Some("must be a static path without parameters, wildcards, query or fragment");
    }
    if path.split('/').any(|segment| segment.starts_with(':')) {
        return Some("segments must not start with ':'");
    }
    None
}

fn non_empty(path: &str) -> Option<&str> {
    (!path.is_empty()).then_some(path)
}
