//! Naming-resolution behavior across a whole bootstrap.

use gantry_config::EnvOptions;
use gantry_core::{Bootstrap, DiscoveryOutcome};
use gantry_fs::NormalizedPath;
use gantry_issue::Stage;
use gantry_naming::{AliasScope, ComponentKind, ComponentRef};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn component(root: &Path, name: &str, kind: ComponentKind) -> ComponentRef {
    let dir = root.join(name);
    fs::create_dir_all(dir.join("config")).unwrap();
    ComponentRef::new(name, kind, NormalizedPath::new(dir))
}

fn isolated_env() -> EnvOptions {
    EnvOptions {
        config_dir: Some(NormalizedPath::new("/nonexistent/gantry-external")),
        ..Default::default()
    }
}

#[test]
fn renamed_plugin_keeps_answering_to_its_former_names() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let application = component(root, "demo-app", ComponentKind::Application);
    let plugin = component(root, "gantry-plugin-ledger", ComponentKind::Plugin)
        .with_formers(["gantry-plugin-bookkeeping"]);
    // The application still addresses the plugin by its old short code.
    fs::write(
        root.join("demo-app/config/sandbox.toml"),
        "[plugins.bookkeeping]\ncurrency = \"EUR\"\n",
    )
    .unwrap();

    let discovery = DiscoveryOutcome {
        application,
        framework: component(root, "gantry", ComponentKind::Framework),
        plugins: vec![plugin],
        bridges: vec![],
    };

    let outcome = Bootstrap::new(discovery)
        .with_env(isolated_env())
        .run()
        .unwrap();

    // Config authored under the former name landed on the current code.
    assert_eq!(
        outcome.config.sandbox.mixture["plugins"]["ledger"]["currency"],
        "EUR"
    );
    // And the resolver answers for every historical alias.
    for alias in ["bookkeeping", "gantryPluginBookkeeping", "ledger"] {
        assert_eq!(
            outcome
                .resolver
                .original_name_of(alias, AliasScope::Plugin)
                .unwrap(),
            "gantry-plugin-ledger"
        );
    }
}

#[test]
fn unmatched_component_name_is_observable_and_boots() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let discovery = DiscoveryOutcome {
        application: component(root, "demo-app", ComponentKind::Application),
        framework: component(root, "gantry", ComponentKind::Framework),
        plugins: vec![component(root, "oddly-named-thing", ComponentKind::Plugin)],
        bridges: vec![],
    };

    let outcome = Bootstrap::new(discovery)
        .with_env(isolated_env())
        .run()
        .unwrap();

    // Literal behavior preserved: code stays equal to the name.
    let odd = outcome
        .refs
        .iter()
        .find(|r| r.name == "oddly-named-thing")
        .unwrap();
    assert_eq!(odd.code, "oddly-named-thing");
    // And the outcome is observable rather than silently swallowed.
    assert_eq!(outcome.unmatched_names, vec!["oddly-named-thing"]);
    assert_eq!(outcome.summary.total_of_errors, 0);
}

#[test]
fn alias_collision_is_reported_but_not_fatal_until_used() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let discovery = DiscoveryOutcome {
        application: component(root, "demo-app", ComponentKind::Application),
        framework: component(root, "gantry", ComponentKind::Framework),
        plugins: vec![
            component(root, "gantry-plugin-cache", ComponentKind::Plugin),
            component(root, "gantry-plugin-storage", ComponentKind::Plugin)
                .with_formers(["gantry-plugin-cache"]),
        ],
        bridges: vec![],
    };

    // No configuration dereferences the collided alias, so the bootstrap
    // passes its barrier.
    let outcome = Bootstrap::new(discovery)
        .with_env(isolated_env())
        .run()
        .unwrap();

    let naming_records: Vec<_> = outcome
        .records
        .iter()
        .filter(|r| r.stage == Stage::Naming)
        .collect();
    assert!(!naming_records.is_empty());
    assert!(naming_records.iter().all(|r| !r.has_error));

    // Dereferencing the collided alias is the concrete failure.
    assert!(
        outcome
            .resolver
            .original_name_of("cache", AliasScope::Plugin)
            .is_err()
    );
}
