//! OpenFetch generator CLI
//!
//! Command-line interface for resolving layered client configuration and
//! generating typed fetch modules.

mod compiler;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use openfetch_codegen::{ModuleGenerator, keyed_composables};
use openfetch_common::Project;
use openfetch_resolver::SchemaResolver;
use std::path::{Path, PathBuf};

use crate::compiler::CommandCompiler;

#[derive(Parser)]
#[command(name = "openfetch-gen")]
#[command(version, about = "Generate typed OpenAPI fetch clients from layered project configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configured clients and display their schema locations
    #[command(after_help = "EXAMPLES:\n  \
        # Resolve clients from the default project file\n  \
        openfetch-gen resolve\n\n  \
        # Resolve clients from an explicit project file\n  \
        openfetch-gen resolve --project ./config/openfetch.yaml")]
    Resolve {
        /// Path to the project file (YAML or JSON)
        #[arg(short, long, default_value = "openfetch.yaml")]
        project: PathBuf,
    },

    /// Display the planned artifact set without generating anything
    #[command(after_help = "EXAMPLES:\n  \
        # Show the artifacts a generate run would produce\n  \
        openfetch-gen plan --project openfetch.yaml")]
    Plan {
        /// Path to the project file (YAML or JSON)
        #[arg(short, long, default_value = "openfetch.yaml")]
        project: PathBuf,
    },

    /// Generate typed modules for every resolved client
    #[command(after_help = "EXAMPLES:\n  \
        # Generate modules with the default type compiler\n  \
        openfetch-gen generate --project openfetch.yaml --output ./generated\n\n  \
        # Use an explicit compiler command\n  \
        openfetch-gen generate \\\n    \
        --project openfetch.yaml \\\n    \
        --compiler \"npx openapi-typescript\" \\\n    \
        --output ./generated")]
    Generate {
        /// Path to the project file (YAML or JSON)
        #[arg(short, long, default_value = "openfetch.yaml")]
        project: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./generated")]
        output: PathBuf,

        /// Command invoked as the OpenAPI type compiler; receives the
        /// schema location as its final argument and writes to stdout
        #[arg(long, default_value = "npx openapi-typescript")]
        compiler: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { project } => resolve_command(project.as_path(), cli.verbose),
        Commands::Plan { project } => plan_command(project.as_path(), cli.verbose),
        Commands::Generate {
            project,
            output,
            compiler,
        } => generate_command(project.as_path(), output.as_path(), &compiler, cli.verbose),
    }
}

fn load_and_resolve(project_path: &Path) -> Result<Vec<openfetch_common::ResolvedSchema>> {
    println!(
        "{} Loading project file: {}",
        "→".cyan(),
        project_path.display()
    );
    let project = Project::from_file(project_path).context("Failed to load project file")?;

    println!(
        "{} Resolving clients across {} layer(s)",
        "→".cyan(),
        project.layers.len()
    );
    SchemaResolver::from_project(&project)
        .resolve()
        .context("Failed to resolve client schemas")
}

fn resolve_command(project_path: &Path, verbose: bool) -> Result<()> {
    let schemas = load_and_resolve(project_path)?;

    println!("\n{}", "✓ Resolution successful!".green().bold());
    println!("\n{}", "Clients:".bold());
    for schema in &schemas {
        println!(
            "  • {} → {}",
            schema.name.cyan(),
            schema.location.to_string().yellow()
        );
        if verbose {
            println!("    Eager: {}", schema.fetch_name.composable);
            println!("    Lazy:  {}", schema.fetch_name.lazy_composable);
        }
    }

    Ok(())
}

fn plan_command(project_path: &Path, verbose: bool) -> Result<()> {
    let schemas = load_and_resolve(project_path)?;

    let generator = ModuleGenerator::new(&schemas).context("Failed to load templates")?;
    let plan = generator.plan();

    println!("\n{}", "Planned artifacts:".bold());
    for module in &plan.type_modules {
        println!("  • {} ({})", module.filename.yellow(), module.client);
    }
    println!("  • {}", plan.runtime_module.yellow());
    println!("  • {}", plan.ambient_module.yellow());

    if verbose {
        println!("\n{}", "Keyed composables:".bold());
        for row in keyed_composables(&schemas) {
            println!("  • {} (arity {})", row.name.cyan(), row.argument_length);
        }
    }

    Ok(())
}

fn generate_command(
    project_path: &Path,
    output: &Path,
    compiler_command: &str,
    verbose: bool,
) -> Result<()> {
    let schemas = load_and_resolve(project_path)?;

    if verbose {
        println!("  Compiler: {compiler_command}");
        println!("  Output: {}", output.display());
    }

    let compiler =
        CommandCompiler::from_command_line(compiler_command).context("Invalid compiler command")?;
    let generator = ModuleGenerator::new(&schemas).context("Failed to load templates")?;

    println!(
        "{} Generating modules for {} client(s)...",
        "→".cyan(),
        schemas.len()
    );
    generator
        .generate_to_directory(&compiler, output)
        .context("Failed to generate modules")?;

    let plan = generator.plan();
    println!(
        "\n{} Generated {} artifact(s) to {}",
        "✓".green().bold(),
        plan.type_modules.len() + 2,
        output.display()
    );

    Ok(())
}
