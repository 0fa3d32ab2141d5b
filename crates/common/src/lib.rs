//! Common types and utilities for the OpenFetch generator
//!
//! This crate contains shared data structures, error types, and utilities
//! used across the resolver, codegen, runtime, and CLI components.

mod config;
mod naming;
mod schema;

pub use config::{ClientConfig, ConfigLayer, Project, PublicClientConfig};
pub use naming::{to_kebab_case, to_pascal_case};
pub use schema::{CodegenOptions, FetchName, KeyedComposable, ResolvedSchema, SchemaLocation};

use thiserror::Error;

/// Errors that can occur during client resolution and generation
#[derive(Error, Debug)]
pub enum OpenFetchError {
    /// A declared client has no resolvable OpenAPI schema location.
    /// Fatal: the resolution pass aborts with no partial client set.
    #[error("Could not find OpenAPI schema for \"{client}\"")]
    Resolution { client: String },

    #[error("Project error: {0}")]
    Project(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for resolution and generation operations
pub type Result<T> = std::result::Result<T, OpenFetchError>;
