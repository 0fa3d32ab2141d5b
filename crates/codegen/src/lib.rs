//! Module and type generation for resolved OpenFetch clients
//!
//! This crate turns the resolved schema descriptors into generated
//! artifacts:
//! - one type-declaration module per client, produced through the external
//!   OpenAPI type compiler
//! - one runtime module exporting a typed eager and lazy composable per
//!   client
//! - one ambient-types module augmenting the host's extension points with
//!   `$<name>Fetch` properties

mod plan;
mod templates;

pub use plan::{ArtifactPlan, TypeModule};

use std::fs;
use std::path::Path;

use openfetch_common::{
    CodegenOptions, KeyedComposable, OpenFetchError, ResolvedSchema, Result, SchemaLocation,
    to_kebab_case,
};
use serde::Serialize;
use tera::Tera;

/// Name under which generated artifacts are filed
pub const MODULE_NAME: &str = "open-fetch";

/// External OpenAPI-to-types compiler
///
/// Treated as a black box: given a schema location and passthrough options
/// it returns the text of a type-declaration module. Compiler failures are
/// propagated unmodified and abort the build.
#[cfg_attr(test, mockall::automock)]
pub trait TypesCompiler {
    fn compile(&self, location: &SchemaLocation, options: &CodegenOptions) -> Result<String>;
}

/// Template context row for one client
#[derive(Debug, Serialize)]
struct ClientView<'a> {
    name: &'a str,
    composable: &'a str,
    lazy_composable: &'a str,
}

/// Module generator
///
/// Renders the runtime and ambient-types modules from the resolved
/// descriptor list and drives the type compiler for the per-client
/// declaration modules.
pub struct ModuleGenerator<'a> {
    schemas: &'a [ResolvedSchema],
    tera: Tera,
}

impl<'a> ModuleGenerator<'a> {
    /// Create a generator over a resolved descriptor list
    pub fn new(schemas: &'a [ResolvedSchema]) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { schemas, tera })
    }

    /// Plan the artifact set without touching the filesystem
    pub fn plan(&self) -> ArtifactPlan {
        ArtifactPlan::for_schemas(self.schemas)
    }

    /// Render the runtime module exporting typed composables
    ///
    /// With zero clients the module still renders as valid source: no
    /// `OpenFetchClientName` union and no composable exports are emitted.
    pub fn render_runtime_module(&self) -> Result<String> {
        self.render("runtime_module.ts")
    }

    /// Render the ambient-types module augmenting the host extension points
    pub fn render_types_module(&self) -> Result<String> {
        self.render("ambient_types.d.ts")
    }

    fn render(&self, template: &str) -> Result<String> {
        let context = self.create_context();
        self.tera
            .render(template, &context)
            .map_err(|e| OpenFetchError::Generation(format!("Template error: {e}")))
    }

    fn create_context(&self) -> tera::Context {
        let clients: Vec<ClientView<'_>> = self
            .schemas
            .iter()
            .map(|schema| ClientView {
                name: &schema.name,
                composable: &schema.fetch_name.composable,
                lazy_composable: &schema.fetch_name.lazy_composable,
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("module_name", MODULE_NAME);
        context.insert("clients", &clients);
        context
    }

    /// Generate all artifacts to a directory
    pub fn generate_to_directory(
        &self,
        compiler: &dyn TypesCompiler,
        output_dir: &Path,
    ) -> Result<()> {
        let types_dir = output_dir.join("types").join(MODULE_NAME);
        fs::create_dir_all(&types_dir).map_err(|e| {
            OpenFetchError::Generation(format!("Failed to create types directory: {e}"))
        })?;

        for schema in self.schemas {
            let contents = compiler.compile(&schema.location, &schema.openapi_ts)?;
            let output_path = types_dir.join(format!("{}.d.ts", to_kebab_case(&schema.name)));
            fs::write(output_path, contents).map_err(|e| {
                OpenFetchError::Generation(format!(
                    "Failed to write types for {}: {e}",
                    schema.name
                ))
            })?;
        }

        let runtime = self.render_runtime_module()?;
        fs::write(output_dir.join(format!("{MODULE_NAME}.ts")), runtime).map_err(|e| {
            OpenFetchError::Generation(format!("Failed to write {MODULE_NAME}.ts: {e}"))
        })?;

        let ambient = self.render_types_module()?;
        fs::write(
            output_dir.join("types").join(format!("{MODULE_NAME}.d.ts")),
            ambient,
        )
        .map_err(|e| {
            OpenFetchError::Generation(format!("Failed to write {MODULE_NAME}.d.ts: {e}"))
        })?;

        Ok(())
    }
}

/// Plan and generate artifacts (convenience function)
pub fn generate_modules(
    schemas: &[ResolvedSchema],
    compiler: &dyn TypesCompiler,
    output_path: &str,
) -> Result<()> {
    let generator = ModuleGenerator::new(schemas)?;
    generator.generate_to_directory(compiler, Path::new(output_path))
}

/// Keyed-composables registration rows for the host build
///
/// Both composables take the url, options and auto-key arguments, so the
/// registered arity is always three.
pub fn keyed_composables(schemas: &[ResolvedSchema]) -> Vec<KeyedComposable> {
    schemas
        .iter()
        .flat_map(|schema| {
            [
                KeyedComposable {
                    name: schema.fetch_name.composable.clone(),
                    argument_length: 3,
                },
                KeyedComposable {
                    name: schema.fetch_name.lazy_composable.clone(),
                    argument_length: 3,
                },
            ]
        })
        .collect()
}
