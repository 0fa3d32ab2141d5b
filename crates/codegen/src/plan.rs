//! Artifact planning
//!
//! Planning is pure: it names every artifact the generator will produce
//! without performing any I/O.

use serde::Serialize;

use openfetch_common::{KeyedComposable, ResolvedSchema, to_kebab_case};

use crate::{MODULE_NAME, keyed_composables};

/// One planned type-declaration module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeModule {
    /// Client the module belongs to
    pub client: String,
    /// Output filename, relative to the generation root
    pub filename: String,
}

/// The planned artifact set for a resolved client list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactPlan {
    /// One type-declaration module per client
    pub type_modules: Vec<TypeModule>,
    /// Runtime module exporting the typed composables
    pub runtime_module: String,
    /// Ambient-types module augmenting the host extension points
    pub ambient_module: String,
    /// Registration rows for the host's keyed-composables optimization
    pub keyed_composables: Vec<KeyedComposable>,
}

impl ArtifactPlan {
    /// Plan the artifacts for a resolved descriptor list
    pub fn for_schemas(schemas: &[ResolvedSchema]) -> Self {
        let type_modules = schemas
            .iter()
            .map(|schema| TypeModule {
                client: schema.name.clone(),
                filename: format!(
                    "types/{MODULE_NAME}/{}.d.ts",
                    to_kebab_case(&schema.name)
                ),
            })
            .collect();

        ArtifactPlan {
            type_modules,
            runtime_module: format!("{MODULE_NAME}.ts"),
            ambient_module: format!("types/{MODULE_NAME}.d.ts"),
            keyed_composables: keyed_composables(schemas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openfetch_common::{CodegenOptions, FetchName, SchemaLocation};
    use std::path::PathBuf;

    fn schema(name: &str) -> ResolvedSchema {
        ResolvedSchema {
            name: name.to_string(),
            fetch_name: FetchName::for_client(name),
            location: SchemaLocation::File(PathBuf::from("spec.json")),
            openapi_ts: CodegenOptions::default(),
        }
    }

    #[test]
    fn test_plan_filenames() {
        let plan = ArtifactPlan::for_schemas(&[schema("userProfile")]);

        assert_eq!(
            plan.type_modules[0].filename,
            "types/open-fetch/user-profile.d.ts"
        );
        assert_eq!(plan.runtime_module, "open-fetch.ts");
        assert_eq!(plan.ambient_module, "types/open-fetch.d.ts");
    }

    #[test]
    fn test_empty_plan_has_no_type_modules() {
        let plan = ArtifactPlan::for_schemas(&[]);
        assert!(plan.type_modules.is_empty());
        assert!(plan.keyed_composables.is_empty());
    }
}
