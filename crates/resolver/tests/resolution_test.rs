//! Integration tests for schema resolution against a real filesystem

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use openfetch_common::{ClientConfig, CodegenOptions, ConfigLayer, OpenFetchError, SchemaLocation};
use openfetch_resolver::SchemaResolver;
use tempfile::TempDir;

fn write_conventional_schema(src_dir: &Path, name: &str, file: &str) {
    let dir = src_dir.join("openapi").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(file),
        r#"{"openapi": "3.0.0", "info": {"title": "t", "version": "1"}, "paths": {}}"#,
    )
    .unwrap();
}

fn layer_with(src_dir: &Path, clients: &[(&str, Option<ClientConfig>)]) -> ConfigLayer {
    let mut layer = ConfigLayer {
        src_dir: src_dir.to_path_buf(),
        ..Default::default()
    };
    for (name, config) in clients {
        layer.clients.insert(name.to_string(), config.clone());
    }
    layer
}

#[test]
fn conventional_json_file_is_found() {
    let app = TempDir::new().unwrap();
    write_conventional_schema(app.path(), "pets", "openapi.json");

    let layers = vec![layer_with(
        app.path(),
        &[("pets", Some(ClientConfig::default()))],
    )];
    let overrides = BTreeMap::new();
    let options = CodegenOptions::default();

    let schemas = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap();
    assert_eq!(
        schemas[0].location,
        SchemaLocation::File(app.path().join("openapi/pets/openapi.json"))
    );
}

#[test]
fn json_is_probed_before_yaml() {
    let app = TempDir::new().unwrap();
    write_conventional_schema(app.path(), "pets", "openapi.json");
    write_conventional_schema(app.path(), "pets", "openapi.yaml");

    let layers = vec![layer_with(
        app.path(),
        &[("pets", Some(ClientConfig::default()))],
    )];
    let overrides = BTreeMap::new();
    let options = CodegenOptions::default();

    let schemas = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap();
    assert_eq!(
        schemas[0].location,
        SchemaLocation::File(app.path().join("openapi/pets/openapi.json"))
    );
}

#[test]
fn yaml_is_used_when_json_is_absent() {
    let app = TempDir::new().unwrap();
    write_conventional_schema(app.path(), "pets", "openapi.yaml");

    let layers = vec![layer_with(
        app.path(),
        &[("pets", Some(ClientConfig::default()))],
    )];
    let overrides = BTreeMap::new();
    let options = CodegenOptions::default();

    let schemas = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap();
    assert_eq!(
        schemas[0].location,
        SchemaLocation::File(app.path().join("openapi/pets/openapi.yaml"))
    );
}

#[test]
fn app_layer_resolution_shadows_base_layer_schema() {
    // The app layer declares `pets` with no explicit schema but has the
    // conventional file; the base layer's custom.yaml must be ignored.
    let app = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    write_conventional_schema(app.path(), "pets", "openapi.json");

    let layers = vec![
        layer_with(app.path(), &[("pets", Some(ClientConfig::default()))]),
        layer_with(
            base.path(),
            &[(
                "pets",
                Some(ClientConfig {
                    schema: Some("custom.yaml".to_string()),
                    ..Default::default()
                }),
            )],
        ),
    ];
    let overrides = BTreeMap::new();
    let options = CodegenOptions::default();

    let schemas = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(
        schemas[0].location,
        SchemaLocation::File(app.path().join("openapi/pets/openapi.json"))
    );
}

#[test]
fn missing_schema_aborts_the_whole_pass() {
    let app = TempDir::new().unwrap();
    write_conventional_schema(app.path(), "pets", "openapi.json");

    // `todos` has neither an explicit schema nor a conventional file
    let layers = vec![layer_with(
        app.path(),
        &[
            ("pets", Some(ClientConfig::default())),
            ("todos", Some(ClientConfig::default())),
        ],
    )];
    let overrides = BTreeMap::new();
    let options = CodegenOptions::default();

    let err = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap_err();
    assert!(matches!(
        err,
        OpenFetchError::Resolution { client } if client == "todos"
    ));
}

#[test]
fn resolution_is_deterministic() {
    let app = TempDir::new().unwrap();
    write_conventional_schema(app.path(), "pets", "openapi.json");
    write_conventional_schema(app.path(), "todos", "openapi.yaml");

    let layers = vec![layer_with(
        app.path(),
        &[
            ("pets", Some(ClientConfig::default())),
            ("todos", Some(ClientConfig::default())),
        ],
    )];
    let overrides = BTreeMap::new();
    let options = CodegenOptions::default();

    let first = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap();
    let second = SchemaResolver::new(&layers, &overrides, &options)
        .resolve()
        .unwrap();
    assert_eq!(first, second);
}
