//! Core types shared by the apidocs crates.
//!
//! - [`ErrorCode`] / [`IntoErrorCode`] / [`ErrorResponse`]: protocol-agnostic
//!   error mapping. With the `http` feature, [`ErrorResponse`] is an axum
//!   response.
//! - [`config`]: TOML configuration loading (`config` feature).

#[cfg(feature = "config")]
pub mod config;
mod error;

pub use error::{ErrorCode, ErrorResponse, IntoErrorCode};
