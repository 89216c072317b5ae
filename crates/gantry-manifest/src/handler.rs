//! Manifest loading and validation orchestration.

use crate::constraint::ConstraintRegistry;
use crate::manifest::{Manifest, check_manifest_shape, constraint_for};
use crate::schema::{combine_bridge_schema, combine_bundle_schema};
use crate::validate::{check_sandbox_constraints, validate_bridge_config, validate_bundle_config};
use gantry_config::ConfigTree;
use gantry_fs::ConfigSource;
use gantry_fs::constants::MANIFEST_BASE_NAME;
use gantry_issue::{CrateKind, IssueInspector, Stage, ValidationResult};
use gantry_naming::{ComponentKind, ComponentRef};
use std::collections::HashMap;

/// Loads component manifests and runs the validation passes.
pub struct ManifestHandler {
    constraints: ConstraintRegistry,
    source: ConfigSource,
}

impl ManifestHandler {
    pub fn new(constraints: ConstraintRegistry) -> Self {
        Self {
            constraints,
            source: ConfigSource::new(),
        }
    }

    /// Load one component's manifest.
    ///
    /// An absent manifest file yields `None` without error. A manifest whose
    /// shape violates the meta-schema is non-fatal: the best-effort parsed
    /// manifest is still returned and exactly one `manifest`-stage record is
    /// collected. A file that cannot be parsed at all yields `None` plus the
    /// record.
    pub fn load_manifest(
        &self,
        r: &ComponentRef,
        inspector: &mut IssueInspector,
    ) -> Option<Manifest> {
        match self.source.load_value(&r.path, MANIFEST_BASE_NAME) {
            Ok(None) => None,
            Ok(Some(raw)) => {
                let failures = check_manifest_shape(&raw);
                if !failures.is_empty() {
                    inspector.collect(ValidationResult::error(
                        Stage::Manifest,
                        kind_of(r.kind),
                        &r.name,
                        failures.join("\n"),
                    ));
                }
                Some(Manifest::from_raw(
                    &raw,
                    constraint_for(&self.constraints, &r.name),
                ))
            }
            Err(e) => {
                inspector.collect(ValidationResult::error(
                    Stage::Manifest,
                    kind_of(r.kind),
                    &r.name,
                    e.to_string(),
                ));
                None
            }
        }
    }

    /// Load the manifests of all refs, keyed by component full name.
    pub fn load_all(
        &self,
        refs: &[ComponentRef],
        inspector: &mut IssueInspector,
    ) -> HashMap<String, Manifest> {
        let mut manifests = HashMap::new();
        for r in refs {
            if let Some(manifest) = self.load_manifest(r, inspector) {
                tracing::debug!(component = %r.name, "Loaded manifest");
                manifests.insert(r.name.clone(), manifest);
            }
        }
        manifests
    }

    /// Run all validation passes over the merged sandbox configuration.
    ///
    /// Appends one `config/schema` record per crate carrying a schema and one
    /// `config/constraints` record per crate declaring a constraint check.
    /// Never short-circuits.
    pub fn validate_config(
        &self,
        tree: &ConfigTree,
        refs: &[ComponentRef],
        manifests: &HashMap<String, Manifest>,
        inspector: &mut IssueInspector,
    ) {
        let sandbox = &tree.sandbox.mixture;
        let bundle = combine_bundle_schema(refs, manifests);
        let bridges = combine_bridge_schema(refs, manifests);

        inspector.collect_all(validate_bundle_config(sandbox, &bundle));
        inspector.collect_all(validate_bridge_config(sandbox, &bridges));
        inspector.collect_all(check_sandbox_constraints(sandbox, &bundle));
    }
}

fn kind_of(kind: ComponentKind) -> CrateKind {
    match kind {
        ComponentKind::Application => CrateKind::Application,
        ComponentKind::Framework => CrateKind::Framework,
        ComponentKind::Plugin => CrateKind::Plugin,
        ComponentKind::Bridge => CrateKind::Bridge,
    }
}
