//! End-to-end bootstrap scenarios.
//!
//! These tests exercise the complete flow: discovery input -> alias
//! resolution -> layered config load -> manifest validation -> barrier.

use gantry_config::EnvOptions;
use gantry_core::{Bootstrap, DiscoveryOutcome};
use gantry_fs::NormalizedPath;
use gantry_issue::{CrateKind, Stage};
use gantry_manifest::ConstraintRegistry;
use gantry_naming::{ComponentKind, ComponentRef};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn component(root: &Path, name: &str, kind: ComponentKind) -> ComponentRef {
    let dir = root.join(name);
    fs::create_dir_all(dir.join("config")).unwrap();
    ComponentRef::new(name, kind, NormalizedPath::new(dir))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const HOST_PORT_MANIFEST: &str = r#"
[config.migration]

[config.validation.schema]
type = "object"
required = ["host", "port"]
"#;

/// Two plugins, each depending on its own bridge, both with host/port
/// schemas. The application supplies valid config for both.
fn setup_bundle(root: &Path) -> DiscoveryOutcome {
    let application = component(root, "demo-app", ComponentKind::Application);
    let p_one = component(root, "gantry-plugin-p-one", ComponentKind::Plugin)
        .with_bridge_depends(["b-one"])
        .with_plugin_depends(["p-two"]);
    let p_two = component(root, "gantry-plugin-p-two", ComponentKind::Plugin)
        .with_bridge_depends(["b-two"]);
    let b_one = component(root, "gantry-bridge-b-one", ComponentKind::Bridge);
    let b_two = component(root, "gantry-bridge-b-two", ComponentKind::Bridge);
    let framework = component(root, "gantry", ComponentKind::Framework);

    write(root, "gantry-plugin-p-one/manifest.toml", HOST_PORT_MANIFEST);
    write(root, "gantry-plugin-p-two/manifest.toml", HOST_PORT_MANIFEST);
    write(
        root,
        "demo-app/config/sandbox.toml",
        r#"
[plugins.p-one]
host = "localhost"
port = 8080

[plugins.p-two]
host = "localhost"
port = 8081

[bridges.store.b-one]
db = 0

[bridges.queue.b-two]
db = 1
"#,
    );

    DiscoveryOutcome {
        application,
        framework,
        plugins: vec![p_one, p_two],
        bridges: vec![b_one, b_two],
    }
}

/// Environment snapshot pointing the external config dir somewhere inert.
fn isolated_env() -> EnvOptions {
    EnvOptions {
        config_dir: Some(NormalizedPath::new("/nonexistent/gantry-external")),
        ..Default::default()
    }
}

#[test]
fn two_plugin_scenario_yields_exactly_two_passing_schema_records() {
    let temp = TempDir::new().unwrap();
    let outcome = Bootstrap::new(setup_bundle(temp.path()))
        .with_env(isolated_env())
        .run()
        .unwrap();

    let schema_records: Vec<_> = outcome
        .records
        .iter()
        .filter(|r| r.stage == Stage::ConfigSchema && r.kind == CrateKind::Plugin)
        .collect();

    assert_eq!(schema_records.len(), 2);
    assert!(schema_records.iter().all(|r| !r.has_error));
    let names: Vec<&str> = schema_records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["gantry-plugin-p-one", "gantry-plugin-p-two"]);
}

#[test]
fn bridge_references_are_canonicalized_under_wildcard_owner() {
    let temp = TempDir::new().unwrap();
    let outcome = Bootstrap::new(setup_bundle(temp.path()))
        .with_env(isolated_env())
        .run()
        .unwrap();

    // The legacy flat `ref -> bridge -> descriptor` authoring came out as
    // `bridge-code -> "*" -> ref -> descriptor`.
    let bridges = &outcome.config.sandbox.mixture["bridges"];
    assert_eq!(bridges["b-one"]["*"]["store"]["db"], 0);
    assert_eq!(bridges["b-two"]["*"]["queue"]["db"], 1);
}

#[test]
fn constraint_checks_observe_exactly_their_declared_dependencies() {
    let temp = TempDir::new().unwrap();
    let discovery = setup_bundle(temp.path());

    let mut constraints = ConstraintRegistry::new();
    // p-one declared pluginDepends = [p-two] and bridgeDepends = [b-one]:
    // its view must be exactly {p-one, p-two} + {b-one}.
    constraints.register("gantry-plugin-p-one", |view| {
        let plugins = view["plugins"].as_object().ok_or("missing plugins")?;
        let mut plugin_keys: Vec<&str> = plugins.keys().map(String::as_str).collect();
        plugin_keys.sort_unstable();
        if plugin_keys != ["p-one", "p-two"] {
            return Err(format!("unexpected plugin view: {plugin_keys:?}"));
        }
        let bridges = view["bridges"].as_object().ok_or("missing bridges")?;
        let bridge_keys: Vec<&str> = bridges.keys().map(String::as_str).collect();
        if bridge_keys != ["b-one"] {
            return Err(format!("unexpected bridge view: {bridge_keys:?}"));
        }
        Ok(true)
    });
    // p-two declared no plugin dependencies: it must see only itself, and
    // only its declared bridge.
    constraints.register("gantry-plugin-p-two", |view| {
        let plugins = view["plugins"].as_object().ok_or("missing plugins")?;
        let plugin_keys: Vec<&str> = plugins.keys().map(String::as_str).collect();
        if plugin_keys != ["p-two"] {
            return Err(format!("unexpected plugin view: {plugin_keys:?}"));
        }
        let bridges = view["bridges"].as_object().ok_or("missing bridges")?;
        let bridge_keys: Vec<&str> = bridges.keys().map(String::as_str).collect();
        if bridge_keys != ["b-two"] {
            return Err(format!("unexpected bridge view: {bridge_keys:?}"));
        }
        Ok(true)
    });

    let outcome = Bootstrap::new(discovery)
        .with_constraints(constraints)
        .with_env(isolated_env())
        .run()
        .unwrap();

    let constraint_records: Vec<_> = outcome
        .records
        .iter()
        .filter(|r| r.stage == Stage::ConfigConstraints)
        .collect();
    assert_eq!(constraint_records.len(), 2);
    assert!(constraint_records.iter().all(|r| !r.has_error));
}

#[test]
fn default_and_mixture_disciplines_invert_on_the_same_fixture() {
    let temp = TempDir::new().unwrap();
    let discovery = setup_bundle(temp.path());
    // The plugin bundles its own default for a key the application also sets.
    write(
        temp.path(),
        "gantry-plugin-p-one/config/sandbox.toml",
        "[plugins.p-one]\nhost = \"bundled.example\"\nretries = 3\n",
    );

    let outcome = Bootstrap::new(discovery)
        .with_env(isolated_env())
        .run()
        .unwrap();

    let layer = &outcome.config.sandbox;
    // default: first-write-wins, the application's value survives.
    assert_eq!(layer.default["plugins"]["p-one"]["host"], "localhost");
    // The plugin still fills in keys the application never set.
    assert_eq!(layer.default["plugins"]["p-one"]["retries"], 3);
    // mixture: last-write-wins, the plugin merged after the application.
    assert_eq!(layer.mixture["plugins"]["p-one"]["host"], "bundled.example");
}

#[test]
fn sandbox_label_order_decides_the_winner() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "demo-app/config/sandbox_blue.toml",
        "[plugins.p-one]\ntheme = \"blue\"\n",
    );
    write(
        temp.path(),
        "demo-app/config/sandbox_green.toml",
        "[plugins.p-one]\ntheme = \"green\"\n",
    );

    let run = |labels: [&str; 2]| {
        Bootstrap::new(setup_bundle(temp.path()))
            .with_env(isolated_env())
            .with_private_sandbox_labels(labels)
            .run()
            .unwrap()
    };

    let bg = run(["blue", "green"]);
    assert_eq!(
        bg.config.sandbox.mixture["plugins"]["p-one"]["theme"],
        "green"
    );

    let gb = run(["green", "blue"]);
    assert_eq!(
        gb.config.sandbox.mixture["plugins"]["p-one"]["theme"],
        "blue"
    );
}

#[test]
fn string_schema_manifest_boots_with_one_manifest_error() {
    let temp = TempDir::new().unwrap();
    let discovery = setup_bundle(temp.path());
    write(
        temp.path(),
        "demo-app/manifest.json",
        r#"{ "config": { "validation": { "schema": "not-an-object" } } }"#,
    );

    let outcome = Bootstrap::new(discovery)
        .with_env(isolated_env())
        .with_exit_on_error(false)
        .run()
        .unwrap();

    let manifest_errors: Vec<_> = outcome
        .summary
        .errors
        .iter()
        .filter(|r| r.stage == Stage::Manifest)
        .collect();
    assert_eq!(manifest_errors.len(), 1);
    assert_eq!(manifest_errors[0].name, "demo-app");
    assert!(manifest_errors[0].has_error);
    assert_eq!(outcome.summary.total_of_errors, 1);
}

#[test]
fn schema_violation_surfaces_every_problem_in_one_pass() {
    let temp = TempDir::new().unwrap();
    let discovery = setup_bundle(temp.path());
    // Break both plugins at once: validation must not short-circuit.
    write(
        temp.path(),
        "demo-app/config/sandbox.toml",
        r#"
[plugins.p-one]
host = "localhost"

[plugins.p-two]
port = 8081
"#,
    );

    let err = Bootstrap::new(discovery)
        .with_env(isolated_env())
        .run()
        .unwrap_err();

    let gantry_core::Error::Barrier(barrier) = err;
    assert_eq!(barrier.summary.total_of_errors, 2);
    let names: Vec<&str> = barrier
        .summary
        .errors
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["gantry-plugin-p-one", "gantry-plugin-p-two"]);
}

#[test]
fn external_config_directory_and_labels_apply_in_directory_then_label_order() {
    let temp = TempDir::new().unwrap();
    let external = TempDir::new().unwrap();
    let discovery = setup_bundle(temp.path());

    write(
        temp.path(),
        "demo-app/config/sandbox_site.toml",
        "[plugins.p-one]\nsource = \"app-label\"\nonly_app = true\n",
    );
    write(
        external.path(),
        "sandbox.toml",
        "[plugins.p-one]\nsource = \"external-base\"\n",
    );
    write(
        external.path(),
        "sandbox_site.toml",
        "[plugins.p-one]\nsource = \"external-label\"\n",
    );

    let env = EnvOptions {
        config_dir: Some(NormalizedPath::new(external.path())),
        sandbox_labels: vec!["site".into()],
        ..Default::default()
    };
    let outcome = Bootstrap::new(discovery).with_env(env).run().unwrap();

    let p_one = &outcome.config.sandbox.mixture["plugins"]["p-one"];
    // app label file applied first, then external base, then external label.
    assert_eq!(p_one["source"], "external-label");
    assert_eq!(p_one["only_app"], true);
}
