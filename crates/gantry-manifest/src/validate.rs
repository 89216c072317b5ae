//! Validation passes over the merged sandbox configuration.
//!
//! All three passes are pure functions: they take the merged configuration
//! and the composite schema trees as explicit arguments and return the
//! records they produced. None of them short-circuits; every crate is checked
//! in one pass.

use crate::schema::{BridgeSchemaEntry, BundleSchema, CrateSchema};
use gantry_issue::{CrateKind, Stage, ValidationResult};
use jsonschema::JSONSchema;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Validate an instance against a JSON Schema, returning the violations.
///
/// A schema that fails to compile yields a single synthetic violation; a
/// valid instance yields an empty list.
pub fn schema_failures(schema: &Value, instance: &Value) -> Vec<String> {
    match JSONSchema::compile(schema) {
        Ok(compiled) => match compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| format!("{} (at instance path '{}')", e, e.instance_path))
                .collect(),
        },
        Err(e) => vec![format!("schema failed to compile: {e}")],
    }
}

/// The configuration slice for a crate, `{}` when absent.
///
/// A missing slice is validated as an empty object, consistent with the
/// missing-file-means-empty-object loading policy.
fn slice(root: &Value, path: &[&str]) -> Value {
    let mut cursor = root;
    for segment in path {
        match cursor.get(segment) {
            Some(next) => cursor = next,
            None => return json!({}),
        }
    }
    cursor.clone()
}

fn record_for(
    stage: Stage,
    kind: CrateKind,
    name: &str,
    failures: Vec<String>,
) -> ValidationResult {
    if failures.is_empty() {
        ValidationResult::ok(stage, kind, name)
    } else {
        ValidationResult::error(stage, kind, name, failures.join("\n"))
    }
}

/// Validate the application and every plugin slice against the composite
/// bundle schema.
///
/// One record is appended per crate entry that carries a usable schema,
/// whether or not it passed.
pub fn validate_bundle_config(sandbox: &Value, bundle: &BundleSchema) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    if let Some(app) = &bundle.sandbox.application {
        if app.schema.is_object() {
            let failures = schema_failures(&app.schema, &slice(sandbox, &["application"]));
            results.push(record_for(
                Stage::ConfigSchema,
                CrateKind::Application,
                &app.crate_scope,
                failures,
            ));
        }
    }

    let mut codes: Vec<&String> = bundle.sandbox.plugins.keys().collect();
    codes.sort();
    for code in codes {
        let entry = &bundle.sandbox.plugins[code];
        if !entry.schema.is_object() {
            continue;
        }
        let failures = schema_failures(&entry.schema, &slice(sandbox, &["plugins", code]));
        results.push(record_for(
            Stage::ConfigSchema,
            CrateKind::Plugin,
            &entry.crate_scope,
            failures,
        ));
    }
    results
}

/// Validate every bridge descriptor against its bridge's declared schema.
///
/// The canonical sandbox shape nests descriptors two levels below the bridge
/// code (`bridges.<code>.<owner>.<ref>`); each descriptor is validated
/// separately and the failures aggregate into one record per bridge crate.
pub fn validate_bridge_config(
    sandbox: &Value,
    bridges: &HashMap<String, BridgeSchemaEntry>,
) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    let mut codes: Vec<&String> = bridges.keys().collect();
    codes.sort();
    for code in codes {
        let entry = &bridges[code];
        if !entry.enabled {
            continue;
        }
        let Some(schema) = entry.schema.as_ref().filter(|s| s.is_object()) else {
            continue;
        };

        let mut failures = Vec::new();
        if let Value::Object(owners) = slice(sandbox, &["bridges", code]) {
            for (owner, refs) in &owners {
                let Value::Object(refs) = refs else { continue };
                for (ref_name, descriptor) in refs {
                    for failure in schema_failures(schema, descriptor) {
                        failures.push(format!("{owner}#{ref_name}: {failure}"));
                    }
                }
            }
        }
        results.push(record_for(
            Stage::ConfigSchema,
            CrateKind::Bridge,
            &entry.crate_scope,
            failures,
        ));
    }
    results
}

/// Build the dependency-scoped projection a crate's constraint check is
/// permitted to observe.
///
/// The projection contains the crate's own configuration plus exactly the
/// plugins and bridges it declared as dependencies. This is an
/// information-hiding contract: an undeclared dependency's configuration
/// must never appear here.
fn scoped_projection(
    sandbox: &Value,
    entry: &CrateSchema,
    own_code: Option<&str>,
    is_application: bool,
) -> Value {
    let mut projection = Map::new();

    if is_application {
        projection.insert("application".into(), slice(sandbox, &["application"]));
    }

    let mut plugins = Map::new();
    if let Some(code) = own_code {
        plugins.insert(code.to_string(), slice(sandbox, &["plugins", code]));
    }
    for dep in &entry.plugin_depends {
        plugins.insert(dep.clone(), slice(sandbox, &["plugins", dep]));
    }
    projection.insert("plugins".into(), Value::Object(plugins));

    let mut bridges = Map::new();
    for dep in &entry.bridge_depends {
        bridges.insert(dep.clone(), slice(sandbox, &["bridges", dep]));
    }
    projection.insert("bridges".into(), Value::Object(bridges));

    Value::Object(projection)
}

fn run_check(
    entry: &CrateSchema,
    kind: CrateKind,
    projection: &Value,
) -> Option<ValidationResult> {
    let check = entry.check_constraints.as_ref()?;
    let failures = match check(projection) {
        Ok(true) => Vec::new(),
        Ok(false) => vec!["checkConstraints returned false".to_string()],
        Err(message) => vec![message],
    };
    Some(record_for(
        Stage::ConfigConstraints,
        kind,
        &entry.crate_scope,
        failures,
    ))
}

/// Invoke every crate's custom constraint check with its dependency-scoped
/// projection of the merged sandbox configuration.
pub fn check_sandbox_constraints(sandbox: &Value, bundle: &BundleSchema) -> Vec<ValidationResult> {
    let mut results = Vec::new();

    if let Some(app) = &bundle.sandbox.application {
        let projection = scoped_projection(sandbox, app, None, true);
        if let Some(record) = run_check(app, CrateKind::Application, &projection) {
            results.push(record);
        }
    }

    let mut codes: Vec<&String> = bundle.sandbox.plugins.keys().collect();
    codes.sort();
    for code in codes {
        let entry = &bundle.sandbox.plugins[code];
        let projection = scoped_projection(sandbox, entry, Some(code), false);
        if let Some(record) = run_check(entry, CrateKind::Plugin, &projection) {
            results.push(record);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ConstraintRegistry;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn entry(scope: &str, schema: Value) -> CrateSchema {
        CrateSchema {
            crate_scope: scope.to_string(),
            schema,
            bridge_depends: Vec::new(),
            plugin_depends: Vec::new(),
            check_constraints: None,
        }
    }

    fn host_port_schema() -> Value {
        json!({ "type": "object", "required": ["host", "port"] })
    }

    #[test]
    fn test_two_plugins_yield_exactly_two_passing_records() {
        // Two plugins depending on one bridge each, both slices valid.
        let mut bundle = BundleSchema::default();
        let mut p1 = entry("gantry-plugin-p-one", host_port_schema());
        p1.bridge_depends = vec!["b-one".into()];
        let mut p2 = entry("gantry-plugin-p-two", host_port_schema());
        p2.bridge_depends = vec!["b-two".into()];
        bundle.sandbox.plugins.insert("p-one".into(), p1);
        bundle.sandbox.plugins.insert("p-two".into(), p2);

        let sandbox = json!({
            "plugins": {
                "p-one": { "host": "localhost", "port": 8080 },
                "p-two": { "host": "localhost", "port": 8081 }
            }
        });

        let results = validate_bundle_config(&sandbox, &bundle);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.has_error));
        assert_eq!(results[0].name, "gantry-plugin-p-one");
        assert_eq!(results[1].name, "gantry-plugin-p-two");
        assert!(results.iter().all(|r| r.stage == Stage::ConfigSchema));
    }

    #[test]
    fn test_failing_slice_is_recorded_not_thrown() {
        let mut bundle = BundleSchema::default();
        bundle
            .sandbox
            .plugins
            .insert("p".into(), entry("gantry-plugin-p", host_port_schema()));

        let sandbox = json!({ "plugins": { "p": { "host": "localhost" } } });
        let results = validate_bundle_config(&sandbox, &bundle);

        assert_eq!(results.len(), 1);
        assert!(results[0].has_error);
        assert!(results[0].stack.as_ref().unwrap().contains("port"));
    }

    #[test]
    fn test_absent_slice_validates_as_empty_object() {
        let mut bundle = BundleSchema::default();
        bundle
            .sandbox
            .plugins
            .insert("p".into(), entry("gantry-plugin-p", host_port_schema()));

        let results = validate_bundle_config(&json!({}), &bundle);
        assert_eq!(results.len(), 1);
        assert!(results[0].has_error);
    }

    #[test]
    fn test_application_slice_is_validated_separately() {
        let mut bundle = BundleSchema::default();
        bundle.sandbox.application = Some(entry("demo-app", host_port_schema()));

        let sandbox = json!({ "application": { "host": "0.0.0.0", "port": 80 } });
        let results = validate_bundle_config(&sandbox, &bundle);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, CrateKind::Application);
        assert!(!results[0].has_error);
    }

    #[test]
    fn test_string_schema_entries_are_skipped() {
        let mut bundle = BundleSchema::default();
        bundle
            .sandbox
            .plugins
            .insert("p".into(), entry("gantry-plugin-p", json!("broken")));

        assert!(validate_bundle_config(&json!({}), &bundle).is_empty());
    }

    #[test]
    fn test_bridge_descriptors_validate_individually() {
        let mut bridges = HashMap::new();
        bridges.insert(
            "redis".to_string(),
            BridgeSchemaEntry {
                crate_scope: "gantry-bridge-redis".into(),
                enabled: true,
                schema: Some(json!({ "type": "object", "required": ["host"] })),
            },
        );

        let sandbox = json!({
            "bridges": {
                "redis": {
                    "p-one": { "store": { "host": "localhost" } },
                    "*": { "scratch": { } }
                }
            }
        });

        let results = validate_bridge_config(&sandbox, &bridges);
        assert_eq!(results.len(), 1);
        assert!(results[0].has_error);
        let stack = results[0].stack.as_ref().unwrap();
        assert!(stack.contains("*#scratch"));
        assert!(!stack.contains("p-one#store"));
    }

    #[test]
    fn test_disabled_bridge_is_not_validated() {
        let mut bridges = HashMap::new();
        bridges.insert(
            "smtp".to_string(),
            BridgeSchemaEntry {
                crate_scope: "gantry-bridge-smtp".into(),
                enabled: false,
                schema: Some(json!({ "type": "object", "required": ["relay"] })),
            },
        );

        assert!(validate_bridge_config(&json!({}), &bridges).is_empty());
    }

    #[test]
    fn test_projection_contains_exactly_declared_dependencies() {
        let sandbox = json!({
            "plugins": {
                "p-one": { "a": 1 },
                "p-two": { "b": 2 },
                "p-three": { "c": 3 }
            },
            "bridges": {
                "b-one": { "*": { "r": {} } },
                "b-two": { "*": { "s": {} } }
            }
        });

        let mut entry = entry("gantry-plugin-p-one", Value::Null);
        entry.plugin_depends = vec!["p-two".into()];
        entry.bridge_depends = vec!["b-one".into()];

        let projection = scoped_projection(&sandbox, &entry, Some("p-one"), false);

        let plugins = projection["plugins"].as_object().unwrap();
        let mut plugin_keys: Vec<&String> = plugins.keys().collect();
        plugin_keys.sort();
        assert_eq!(plugin_keys, ["p-one", "p-two"]);

        let bridges = projection["bridges"].as_object().unwrap();
        assert_eq!(bridges.keys().collect::<Vec<_>>(), ["b-one"]);

        // Not the application's view: no application key at all.
        assert!(projection.get("application").is_none());
    }

    #[test]
    fn test_constraint_outcomes_map_to_records() {
        let mut registry = ConstraintRegistry::new();
        registry.register("gantry-plugin-good", |_| Ok(true));
        registry.register("gantry-plugin-bad", |_| Ok(false));
        registry.register("gantry-plugin-ugly", |_| {
            Err("port out of range".to_string())
        });

        let mut bundle = BundleSchema::default();
        for (code, name) in [
            ("good", "gantry-plugin-good"),
            ("bad", "gantry-plugin-bad"),
            ("ugly", "gantry-plugin-ugly"),
        ] {
            let mut e = entry(name, Value::Null);
            e.check_constraints = registry.get(name).map(Arc::clone);
            bundle.sandbox.plugins.insert(code.into(), e);
        }

        let results = check_sandbox_constraints(&json!({}), &bundle);
        assert_eq!(results.len(), 3);

        let by_name = |n: &str| results.iter().find(|r| r.name == n).unwrap();
        assert!(!by_name("gantry-plugin-good").has_error);
        assert!(by_name("gantry-plugin-bad").has_error);
        assert_eq!(
            by_name("gantry-plugin-ugly").stack.as_deref(),
            Some("port out of range")
        );
        assert!(
            results
                .iter()
                .all(|r| r.stage == Stage::ConfigConstraints)
        );
    }

    #[test]
    fn test_crate_without_constraint_yields_no_record() {
        let mut bundle = BundleSchema::default();
        bundle
            .sandbox
            .plugins
            .insert("p".into(), entry("gantry-plugin-p", Value::Null));

        assert!(check_sandbox_constraints(&json!({}), &bundle).is_empty());
    }
}
