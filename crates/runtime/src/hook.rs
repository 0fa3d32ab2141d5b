//! Composable binder
//!
//! Wraps a named or explicit client into a reactive fetch hook. The hook
//! resolves the URL value and the client at call time, attaches the cache
//! key, and hands the fully bound request to the external reactive
//! data-fetching primitive. Loading state, re-fetch triggers, cancellation
//! and timeouts all belong to that primitive and the transport.

use std::fmt;
use std::sync::Arc;

use crate::client::{CallOptions, OpenFetchClient};
use crate::registry::ClientResolver;
use crate::{FetchError, Result};

/// The client a hook binds to: a concrete request client, or a name
/// resolved late through the registry
#[derive(Clone)]
pub enum ClientRef {
    Direct(OpenFetchClient),
    Named(String),
}

impl From<OpenFetchClient> for ClientRef {
    fn from(client: OpenFetchClient) -> Self {
        ClientRef::Direct(client)
    }
}

impl From<&str> for ClientRef {
    fn from(name: &str) -> Self {
        ClientRef::Named(name.to_string())
    }
}

impl fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientRef::Direct(_) => f.write_str("Direct(..)"),
            ClientRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// A request URL evaluated at hook-call time: static, or computed on demand
#[derive(Clone)]
pub enum UrlValue {
    Static(String),
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl UrlValue {
    /// Resolve to the concrete URL for this call
    pub fn value(&self) -> String {
        match self {
            UrlValue::Static(url) => url.clone(),
            UrlValue::Computed(compute) => compute(),
        }
    }
}

impl From<&str> for UrlValue {
    fn from(url: &str) -> Self {
        UrlValue::Static(url.to_string())
    }
}

impl From<String> for UrlValue {
    fn from(url: String) -> Self {
        UrlValue::Static(url)
    }
}

/// Options accepted by a hook call
#[derive(Debug, Clone, Default)]
pub struct UseFetchOptions {
    /// Transport options forwarded to the request client
    pub call: CallOptions,
    /// Explicit cache key; wins over the auto-derived one
    pub key: Option<String>,
}

/// A fully bound reactive fetch request
///
/// Everything the external reactive primitive needs: the resolved client,
/// the resolved URL, the cache key and the lazy execution flag.
#[derive(Debug, Clone)]
pub struct BoundRequest {
    pub url: String,
    pub client: OpenFetchClient,
    pub key: Option<String>,
    pub lazy: bool,
    pub call: CallOptions,
}

/// External reactive data-fetching primitive (black box)
pub trait ReactiveFetch {
    type State;

    fn use_fetch(&self, request: BoundRequest) -> Self::State;
}

/// A reactive fetch hook bound to one client
pub struct UseOpenFetch {
    client: ClientRef,
    resolver: Arc<dyn ClientResolver + Send + Sync>,
    lazy: bool,
}

impl UseOpenFetch {
    /// Bind one call: resolve the URL value and the client, attach the
    /// explicit or auto-derived cache key, and set the lazy flag.
    pub fn call(
        &self,
        url: impl Into<UrlValue>,
        options: UseFetchOptions,
        auto_key: Option<&str>,
    ) -> Result<BoundRequest> {
        let url = url.into().value();
        let client = match &self.client {
            ClientRef::Direct(client) => client.clone(),
            ClientRef::Named(name) => {
                self.resolver
                    .resolve(name)
                    .ok_or_else(|| FetchError::UnknownClient { name: name.clone() })?
            }
        };
        let key = options.key.or_else(|| auto_key.map(String::from));

        Ok(BoundRequest {
            url,
            client,
            key,
            lazy: self.lazy,
            call: options.call,
        })
    }

    /// Bind one call and hand it to a reactive primitive
    pub fn use_fetch<R: ReactiveFetch>(
        &self,
        reactive: &R,
        url: impl Into<UrlValue>,
        options: UseFetchOptions,
        auto_key: Option<&str>,
    ) -> Result<R::State> {
        Ok(reactive.use_fetch(self.call(url, options, auto_key)?))
    }
}

/// Wrap a client into a reactive fetch hook (factory function)
///
/// `lazy` marks every request bound by this hook for deferred execution;
/// otherwise the reactive primitive resolves immediately on first call.
pub fn create_use_open_fetch(
    client: impl Into<ClientRef>,
    resolver: Arc<dyn ClientResolver + Send + Sync>,
    lazy: bool,
) -> UseOpenFetch {
    UseOpenFetch {
        client: client.into(),
        resolver,
        lazy,
    }
}
