//! Resolved schema descriptors and generated identifier derivation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::naming::to_pascal_case;

/// Location of a client's OpenAPI description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaLocation {
    /// Absolute URL, fetched by the type compiler
    Remote(Url),
    /// Schema file on disk
    File(PathBuf),
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaLocation::Remote(url) => write!(f, "{url}"),
            SchemaLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Generated composable identifiers for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchName {
    /// Eager composable, `use<Name>Fetch`
    pub composable: String,
    /// Lazy composable, `useLazy<Name>Fetch`
    pub lazy_composable: String,
}

impl FetchName {
    /// Derive both composable identifiers from a client name
    ///
    /// A pure function of the name: `user-profile` always yields
    /// `useUserProfileFetch` / `useLazyUserProfileFetch`, no matter which
    /// other clients are configured.
    pub fn for_client(name: &str) -> Self {
        FetchName {
            composable: composable_name(name, false),
            lazy_composable: composable_name(name, true),
        }
    }
}

fn composable_name(name: &str, lazy: bool) -> String {
    format!(
        "use{}{}",
        if lazy { "Lazy" } else { "" },
        to_pascal_case(&format!("{name}-fetch"))
    )
}

/// Options forwarded verbatim to the external OpenAPI type compiler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodegenOptions(pub BTreeMap<String, serde_json::Value>);

/// One client's fully resolved description
///
/// Exactly one descriptor exists per unique client name; descriptors are
/// the sole input to code generation and are not mutated after the
/// resolution pass completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    /// Client name, unique within the resolved set
    pub name: String,
    /// Generated composable identifiers
    pub fetch_name: FetchName,
    /// Resolved schema location
    pub location: SchemaLocation,
    /// Type compiler options
    pub openapi_ts: CodegenOptions,
}

/// Registration row for the host's keyed-composables optimization
///
/// Pass-through metadata: emitted for the host build, never consumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyedComposable {
    pub name: String,
    pub argument_length: usize,
}
