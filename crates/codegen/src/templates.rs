//! Template loading and management

use std::collections::HashMap;

use openfetch_common::{OpenFetchError, Result, to_kebab_case, to_pascal_case};
use tera::{Tera, Value};

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Register custom filters
    tera.register_filter("pascal_case", pascal_case_filter);
    tera.register_filter("kebab_case", kebab_case_filter);

    tera.add_raw_template(
        "runtime_module.ts",
        include_str!("../templates/runtime_module.ts.tera"),
    )
    .map_err(|e| {
        OpenFetchError::Generation(format!("Failed to load runtime_module.ts template: {e}"))
    })?;

    tera.add_raw_template(
        "ambient_types.d.ts",
        include_str!("../templates/ambient_types.d.ts.tera"),
    )
    .map_err(|e| {
        OpenFetchError::Generation(format!("Failed to load ambient_types.d.ts template: {e}"))
    })?;

    Ok(tera)
}

/// Filter to convert a client name to PascalCase
fn pascal_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("pascal_case filter expects a string"))?;
    Ok(Value::String(to_pascal_case(name)))
}

/// Filter to convert a client name to kebab-case
fn kebab_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("kebab_case filter expects a string"))?;
    Ok(Value::String(to_kebab_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        assert!(names.contains(&"runtime_module.ts"));
        assert!(names.contains(&"ambient_types.d.ts"));
    }
}
