//! Layered client configuration
//!
//! Host projects declare OpenFetch clients across an ordered list of
//! configuration layers: the application layer first, shared bases after.
//! Each layer carries a source directory and a partial per-client map.
//! Merging is first-wins per key; a runtime override map takes precedence
//! over layer-declared options for the names it mentions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{CodegenOptions, Result};

/// Per-client request defaults plus an optional explicit schema location
///
/// Every field is optional so layers can declare partial configurations;
/// gaps are filled from less specific layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL prepended to every request path
    pub base_url: Option<String>,
    /// Default query parameters sent with every request
    pub query: BTreeMap<String, String>,
    /// Default headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Explicit schema location: an absolute URL, or a path relative to
    /// the owning layer's source directory
    pub schema: Option<String>,
}

impl ClientConfig {
    /// Merge `self` over a less specific configuration
    ///
    /// Fields already set on `self` win; map fields gain only keys they do
    /// not define yet. Fields unique to either side are kept.
    pub fn merged_over(&self, base: &ClientConfig) -> ClientConfig {
        let mut out = self.clone();
        if out.base_url.is_none() {
            out.base_url = base.base_url.clone();
        }
        if out.schema.is_none() {
            out.schema = base.schema.clone();
        }
        for (k, v) in &base.query {
            out.query.entry(k.clone()).or_insert_with(|| v.clone());
        }
        for (k, v) in &base.headers {
            out.headers.entry(k.clone()).or_insert_with(|| v.clone());
        }
        out
    }

    /// The schema-stripped form exposed to the runtime registry
    pub fn public(&self) -> PublicClientConfig {
        PublicClientConfig {
            base_url: self.base_url.clone(),
            query: self.query.clone(),
            headers: self.headers.clone(),
        }
    }
}

/// Client options safe to hand to the runtime: everything but the schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicClientConfig {
    pub base_url: Option<String>,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

/// One configuration source with a position in the merge order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
    /// Root directory the layer's relative schema paths resolve against
    pub src_dir: PathBuf,
    /// Partial client map; a name mapped to nothing declares the client
    /// without configuring it in this layer
    #[serde(default)]
    pub clients: BTreeMap<String, Option<ClientConfig>>,
}

impl ConfigLayer {
    /// Effective client map for this layer
    ///
    /// Override entries apply only to names this layer configures, and win
    /// per field on conflict. Names the layer declares without a config
    /// stay unconfigured and are skipped by the resolver.
    pub fn effective_clients(
        &self,
        overrides: &BTreeMap<String, ClientConfig>,
    ) -> BTreeMap<String, Option<ClientConfig>> {
        self.clients
            .iter()
            .map(|(name, cfg)| {
                let merged = cfg.as_ref().map(|own| match overrides.get(name) {
                    Some(over) => over.merged_over(own),
                    None => own.clone(),
                });
                (name.clone(), merged)
            })
            .collect()
    }
}

/// Top-level project description: ordered layers plus global options
///
/// Read once at startup and never mutated; resolution and generation both
/// take it by shared reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Layers ordered most specific first
    pub layers: Vec<ConfigLayer>,
    /// Runtime override map; entries for names no layer configures are inert
    pub overrides: BTreeMap<String, ClientConfig>,
    /// Options forwarded verbatim to the OpenAPI type compiler
    pub openapi_ts: CodegenOptions,
}

impl Project {
    /// Load a project file, YAML or JSON by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Ok(serde_yaml::from_str(&content)?),
        }
    }

    /// Parse a project from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Public (schema-stripped) client map for the runtime registry
    ///
    /// First-wins union of every layer's effective configuration, with
    /// override fields applied, schemas removed.
    pub fn public_clients(&self) -> BTreeMap<String, PublicClientConfig> {
        let mut out = BTreeMap::new();
        for layer in &self.layers {
            for (name, cfg) in layer.effective_clients(&self.overrides) {
                if let Some(cfg) = cfg {
                    out.entry(name).or_insert_with(|| cfg.public());
                }
            }
        }
        out
    }
}
