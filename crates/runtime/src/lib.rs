//! Runtime request dispatch for generated OpenFetch clients
//!
//! The generated modules lean on three public entry points:
//! - [`fill_path`] substitutes `{name}` placeholders in a URL template
//! - [`create_open_fetch`] builds a request client bound to base options
//! - [`create_use_open_fetch`] wraps a client into a reactive fetch hook
//!
//! Clients are provisioned once at startup into a [`ClientRegistry`] and
//! treated as read-only afterwards; every request is an independent
//! asynchronous operation. Transport failures surface unmodified, and no
//! retries, deduplication or timeouts are added here.

mod client;
mod hook;
mod path;
mod registry;

pub use client::{
    CallOptions, FetchOptions, OpenFetchClient, OpenFetchOptions, create_open_fetch,
};
pub use hook::{
    BoundRequest, ClientRef, ReactiveFetch, UrlValue, UseFetchOptions, UseOpenFetch,
    create_use_open_fetch,
};
pub use path::{PathParams, fill_path};
pub use registry::{ClientRegistry, ClientResolver};

use thiserror::Error;

/// Errors surfaced by the dispatch layer
#[derive(Error, Debug)]
pub enum FetchError {
    /// Underlying transport failure, surfaced unmodified
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A path parameter value with no string form
    #[error("Path parameter \"{key}\" is not a scalar value")]
    PathParam { key: String },

    /// A late-bound client name with no registry entry
    #[error("No client named \"{name}\" is registered")]
    UnknownClient { name: String },

    /// The templated path and base URL do not combine into a request URL
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for dispatch operations
pub type Result<T> = std::result::Result<T, FetchError>;
