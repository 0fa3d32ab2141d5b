//! Request client bound to a set of base options

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use openfetch_common::PublicClientConfig;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Result;
use crate::path::{PathParams, fill_path};

/// Base transport options a client is bound to at creation time
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Base URL prepended to every request path
    pub base_url: Option<String>,
    /// Query parameters appended to every request
    pub query: BTreeMap<String, String>,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
}

impl From<&PublicClientConfig> for FetchOptions {
    fn from(config: &PublicClientConfig) -> Self {
        FetchOptions {
            base_url: config.base_url.clone(),
            query: config.query.clone(),
            headers: config.headers.clone(),
        }
    }
}

impl FetchOptions {
    /// Shallow merge with per-call options; call fields win on collision,
    /// fields the call leaves out are inherited.
    fn merged_with(&self, call: &CallOptions) -> FetchOptions {
        FetchOptions {
            base_url: call.base_url.clone().or_else(|| self.base_url.clone()),
            query: call.query.clone().unwrap_or_else(|| self.query.clone()),
            headers: call.headers.clone().unwrap_or_else(|| self.headers.clone()),
        }
    }
}

/// Per-call options
///
/// The `path` map is consumed by URL templating and never reaches the
/// transport. `query` and `headers` replace the base maps wholesale when
/// given (shallow merge semantics).
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Path parameters substituted into the URL template
    pub path: PathParams,
    /// HTTP method; GET when unset
    pub method: Option<Method>,
    /// JSON request body
    pub body: Option<serde_json::Value>,
    /// Per-call base URL override
    pub base_url: Option<String>,
    /// Per-call query replacement
    pub query: Option<BTreeMap<String, String>>,
    /// Per-call header replacement
    pub headers: Option<BTreeMap<String, String>>,
}

/// Options a client is created from: a static set, or an interceptor with
/// full dynamic control over the effective options of each call
#[derive(Clone)]
pub enum OpenFetchOptions {
    Static(FetchOptions),
    Interceptor(Arc<dyn Fn(&CallOptions) -> FetchOptions + Send + Sync>),
}

impl fmt::Debug for OpenFetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenFetchOptions::Static(options) => f.debug_tuple("Static").field(options).finish(),
            OpenFetchOptions::Interceptor(_) => f.write_str("Interceptor(..)"),
        }
    }
}

impl From<FetchOptions> for OpenFetchOptions {
    fn from(options: FetchOptions) -> Self {
        OpenFetchOptions::Static(options)
    }
}

/// A request function bound to base options
///
/// Stateless per call; cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenFetchClient {
    http: reqwest::Client,
    options: OpenFetchOptions,
}

impl OpenFetchClient {
    /// Bind a client to base options or an interceptor
    pub fn new(options: impl Into<OpenFetchOptions>) -> Self {
        OpenFetchClient {
            http: reqwest::Client::new(),
            options: options.into(),
        }
    }

    /// Build the transport request for a templated URL
    ///
    /// Substitutes path parameters, computes the effective options (via the
    /// interceptor, or by shallow-merging call options over the base set),
    /// and assembles the final URL, query and headers. No transport policy
    /// is applied here.
    pub fn build_request(&self, url: &str, opts: &CallOptions) -> Result<reqwest::Request> {
        let path = fill_path(url, &opts.path)?;
        let effective = match &self.options {
            OpenFetchOptions::Static(base) => base.merged_with(opts),
            OpenFetchOptions::Interceptor(intercept) => intercept(opts),
        };

        let mut url = match &effective.base_url {
            Some(base) => Url::parse(base)?.join(&path)?,
            None => Url::parse(&path)?,
        };
        if !effective.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &effective.query {
                pairs.append_pair(k, v);
            }
        }

        let method = opts.method.clone().unwrap_or(Method::GET);
        let mut builder = self.http.request(method, url);
        for (k, v) in &effective.headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        if let Some(body) = &opts.body {
            builder = builder.json(body);
        }

        Ok(builder.build()?)
    }

    /// Issue a request and return the raw response
    ///
    /// Transport failures, including the transport's non-2xx policy,
    /// propagate unmodified; status codes are never interpreted here.
    pub async fn send(&self, url: &str, opts: &CallOptions) -> Result<reqwest::Response> {
        let request = self.build_request(url, opts)?;
        debug!(method = %request.method(), url = %request.url(), "dispatching request");
        let response = self.http.execute(request).await?;
        Ok(response.error_for_status()?)
    }

    /// Issue a request and decode the JSON body
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str, opts: &CallOptions) -> Result<T> {
        let response = self.send(url, opts).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Build a request client bound to base options (factory function)
pub fn create_open_fetch(options: impl Into<OpenFetchOptions>) -> OpenFetchClient {
    OpenFetchClient::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchError;
    use serde_json::json;

    fn base(base_url: &str) -> FetchOptions {
        FetchOptions {
            base_url: Some(base_url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_templated_request_url() {
        let client = create_open_fetch(base("http://x"));
        let opts = CallOptions {
            path: [("id".to_string(), json!(1))].into(),
            ..Default::default()
        };

        let request = client.build_request("/a/{id}", &opts).unwrap();
        assert_eq!(request.url().as_str(), "http://x/a/1");
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn test_path_params_never_reach_transport() {
        let client = create_open_fetch(base("http://x"));
        let opts = CallOptions {
            path: [("id".to_string(), json!(7))].into(),
            ..Default::default()
        };

        let request = client.build_request("/a/{id}", &opts).unwrap();
        // The path map is consumed by templating, not serialized as query
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_base_query_and_headers_apply() {
        let options = FetchOptions {
            base_url: Some("http://x".to_string()),
            query: [("version".to_string(), "2".to_string())].into(),
            headers: [("x-api-key".to_string(), "secret".to_string())].into(),
        };
        let client = create_open_fetch(options);

        let request = client.build_request("/a", &CallOptions::default()).unwrap();
        assert_eq!(request.url().query(), Some("version=2"));
        assert_eq!(request.headers()["x-api-key"], "secret");
    }

    #[test]
    fn test_call_options_win_on_collision() {
        let options = FetchOptions {
            base_url: Some("http://x".to_string()),
            query: [("version".to_string(), "2".to_string())].into(),
            ..Default::default()
        };
        let client = create_open_fetch(options);

        let opts = CallOptions {
            query: Some([("version".to_string(), "3".to_string())].into()),
            ..Default::default()
        };
        let request = client.build_request("/a", &opts).unwrap();
        assert_eq!(request.url().query(), Some("version=3"));
    }

    #[test]
    fn test_interceptor_computes_effective_options() {
        let client = create_open_fetch(OpenFetchOptions::Interceptor(Arc::new(|opts| {
            let mut headers = BTreeMap::new();
            if opts.body.is_some() {
                headers.insert("x-has-body".to_string(), "1".to_string());
            }
            FetchOptions {
                base_url: Some("http://intercepted".to_string()),
                headers,
                ..Default::default()
            }
        })));

        let opts = CallOptions {
            method: Some(Method::POST),
            body: Some(json!({"name": "rex"})),
            ..Default::default()
        };
        let request = client.build_request("/pets", &opts).unwrap();
        assert_eq!(request.url().as_str(), "http://intercepted/pets");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.headers()["x-has-body"], "1");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        // Nothing listens on the discard port; the connect error must
        // surface as-is
        let client = create_open_fetch(base("http://127.0.0.1:9"));
        let err = client.send("/a", &CallOptions::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
