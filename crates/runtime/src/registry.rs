//! Named-client registry
//!
//! Built once at application startup from the public (schema-stripped)
//! client configuration, then shared read-only: no writer exists after
//! construction, any number of concurrent readers may resolve clients.

use std::collections::BTreeMap;

use openfetch_common::PublicClientConfig;
use tracing::debug;

use crate::client::{FetchOptions, OpenFetchClient};

/// Late-binding lookup of named clients
///
/// Passed into the composable binder at application wiring time, so hooks
/// created before the clients are provisioned can still resolve them at
/// call time.
pub trait ClientResolver {
    fn resolve(&self, name: &str) -> Option<OpenFetchClient>;
}

/// Registry of provisioned request clients, one per configured name
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: BTreeMap<String, OpenFetchClient>,
}

impl ClientRegistry {
    /// Provision one client per configured name
    pub fn from_config(clients: &BTreeMap<String, PublicClientConfig>) -> Self {
        let clients = clients
            .iter()
            .map(|(name, config)| {
                debug!(client = %name, "provisioning client");
                (name.clone(), OpenFetchClient::new(FetchOptions::from(config)))
            })
            .collect();
        ClientRegistry { clients }
    }

    /// Look up a provisioned client by name
    pub fn get(&self, name: &str) -> Option<&OpenFetchClient> {
        self.clients.get(name)
    }

    /// Names of all provisioned clients
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }
}

impl ClientResolver for ClientRegistry {
    fn resolve(&self, name: &str) -> Option<OpenFetchClient> {
        self.get(name).cloned()
    }
}
