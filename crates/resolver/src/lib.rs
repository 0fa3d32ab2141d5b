//! Schema resolution across layered client configuration
//!
//! This crate determines the final set of named clients and, for each, the
//! location of its OpenAPI description.
//!
//! ## Resolution Strategy
//!
//! Layers are processed in order, most specific first. Within each layer
//! the runtime override map is merged over the layer's own client map, and
//! every not-yet-resolved name is located per the schema location policy:
//! - explicit absolute URL -> used verbatim
//! - explicit non-URL string -> path relative to the layer's source dir
//! - otherwise -> `openapi/<name>/openapi.json`, then `.../openapi.yaml`
//!
//! The first layer to configure a name wins; later layers cannot alter an
//! already-resolved descriptor. A client with no locatable schema aborts
//! the whole pass with an error naming it.

mod locate;

pub use locate::locate_schema;

use std::collections::BTreeMap;

use openfetch_common::{
    ClientConfig, CodegenOptions, ConfigLayer, FetchName, OpenFetchError, Project, ResolvedSchema,
    Result,
};
use tracing::debug;

/// Schema resolver over an ordered list of configuration layers
///
/// # Example
/// ```rust,ignore
/// let resolver = SchemaResolver::new(&layers, &overrides, &options);
/// let schemas = resolver.resolve()?;
/// ```
pub struct SchemaResolver<'a> {
    /// Layers ordered most specific first
    layers: &'a [ConfigLayer],

    /// Runtime override map, limited to configured client names
    overrides: &'a BTreeMap<String, ClientConfig>,

    /// Global type compiler options, copied into every descriptor
    openapi_ts: &'a CodegenOptions,
}

impl<'a> SchemaResolver<'a> {
    /// Create a resolver from explicit parts
    pub fn new(
        layers: &'a [ConfigLayer],
        overrides: &'a BTreeMap<String, ClientConfig>,
        openapi_ts: &'a CodegenOptions,
    ) -> Self {
        Self {
            layers,
            overrides,
            openapi_ts,
        }
    }

    /// Create a resolver over a loaded project file
    pub fn from_project(project: &'a Project) -> Self {
        Self::new(&project.layers, &project.overrides, &project.openapi_ts)
    }

    /// Resolve every configured client to a schema descriptor
    ///
    /// Returns descriptors in first-declaration order. Fails fatally on the
    /// first client with no locatable schema; no partial result is produced.
    pub fn resolve(&self) -> Result<Vec<ResolvedSchema>> {
        let mut schemas: Vec<ResolvedSchema> = Vec::new();

        for layer in self.layers {
            let schemas_dir = layer.src_dir.join("openapi");

            for (name, config) in layer.effective_clients(self.overrides) {
                // First resolution wins; later layers are skipped
                if schemas.iter().any(|item| item.name == name) {
                    continue;
                }
                let Some(config) = config else {
                    debug!(client = %name, "client declared without config, skipping");
                    continue;
                };

                let location = locate_schema(&name, &config, &layer.src_dir, &schemas_dir)
                    .ok_or_else(|| OpenFetchError::Resolution {
                        client: name.clone(),
                    })?;
                debug!(client = %name, location = %location, "resolved schema");

                schemas.push(ResolvedSchema {
                    fetch_name: FetchName::for_client(&name),
                    name,
                    location,
                    openapi_ts: self.openapi_ts.clone(),
                });
            }
        }

        Ok(schemas)
    }
}

/// Resolve a project's clients (convenience function)
pub fn resolve_project(project: &Project) -> Result<Vec<ResolvedSchema>> {
    SchemaResolver::from_project(project).resolve()
}
