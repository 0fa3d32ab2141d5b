//! Schema location policy

use std::path::Path;

use openfetch_common::{ClientConfig, SchemaLocation};
use tracing::debug;
use url::Url;

/// Locate one client's OpenAPI schema
///
/// Applies the location policy in order:
/// 1. explicit config value parsing as an absolute URL -> remote, verbatim
/// 2. explicit non-URL string -> file path relative to `src_dir`
/// 3. `<schemas_dir>/<name>/openapi.json`, then `.../openapi.yaml`,
///    first existing file wins
///
/// Returns `None` when nothing matches; the caller turns that into a fatal
/// resolution error. Filesystem checks are read-only probes.
pub fn locate_schema(
    name: &str,
    config: &ClientConfig,
    src_dir: &Path,
    schemas_dir: &Path,
) -> Option<SchemaLocation> {
    if let Some(schema) = &config.schema {
        return Some(match Url::parse(schema) {
            Ok(url) => SchemaLocation::Remote(url),
            Err(_) => SchemaLocation::File(src_dir.join(schema)),
        });
    }

    let json_path = schemas_dir.join(name).join("openapi.json");
    let yaml_path = schemas_dir.join(name).join("openapi.yaml");

    if json_path.is_file() {
        debug!(client = %name, path = %json_path.display(), "found conventional schema");
        Some(SchemaLocation::File(json_path))
    } else if yaml_path.is_file() {
        debug!(client = %name, path = %yaml_path.display(), "found conventional schema");
        Some(SchemaLocation::File(yaml_path))
    } else {
        None
    }
}
