//! Subprocess-backed OpenAPI type compiler

use std::process::Command;

use anyhow::{Result, bail};
use openfetch_codegen::TypesCompiler;
use openfetch_common::{CodegenOptions, OpenFetchError, SchemaLocation, to_kebab_case};

/// Type compiler that shells out to an external command
///
/// The command receives compiler options as `--flag value` pairs, the
/// schema location as its final argument, and writes the type-declaration
/// module to stdout. A nonzero exit propagates as a generation error for
/// the build.
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    /// Split a command line into program and leading arguments
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let Some(program) = parts.next() else {
            bail!("compiler command is empty");
        };
        Ok(CommandCompiler {
            program,
            args: parts.collect(),
        })
    }

    fn option_args(options: &CodegenOptions) -> Vec<String> {
        let mut args = Vec::new();
        for (key, value) in &options.0 {
            let flag = format!("--{}", to_kebab_case(key));
            match value {
                serde_json::Value::Bool(true) => args.push(flag),
                serde_json::Value::Bool(false) | serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    args.push(flag);
                    args.push(s.clone());
                }
                other => {
                    args.push(flag);
                    args.push(other.to_string());
                }
            }
        }
        args
    }
}

impl TypesCompiler for CommandCompiler {
    fn compile(
        &self,
        location: &SchemaLocation,
        options: &CodegenOptions,
    ) -> openfetch_common::Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(Self::option_args(options))
            .arg(location.to_string())
            .output()
            .map_err(OpenFetchError::Io)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OpenFetchError::Generation(format!(
                "Type compiler failed for {location}: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
