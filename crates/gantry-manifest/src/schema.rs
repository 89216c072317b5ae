//! Composite schema trees combined from the loaded manifests.

use crate::manifest::Manifest;
use gantry_naming::{ComponentKind, ComponentRef};
use serde_json::Value;
use std::collections::HashMap;

use crate::constraint::ConstraintFn;

/// Schema entry for one crate in the composite tree.
#[derive(Clone)]
pub struct CrateSchema {
    /// Fully-qualified crate name.
    pub crate_scope: String,
    /// Declared JSON Schema, verbatim from the manifest.
    pub schema: Value,
    /// Codes of bridges this crate declared as dependencies.
    pub bridge_depends: Vec<String>,
    /// Codes of plugins this crate declared as dependencies.
    pub plugin_depends: Vec<String>,
    /// Custom constraint check, when one was registered.
    pub check_constraints: Option<ConstraintFn>,
}

impl std::fmt::Debug for CrateSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrateSchema")
            .field("crate_scope", &self.crate_scope)
            .field("schema", &self.schema)
            .field("bridge_depends", &self.bridge_depends)
            .field("plugin_depends", &self.plugin_depends)
            .field(
                "check_constraints",
                &self.check_constraints.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

/// Sandbox side of the composite tree.
#[derive(Debug, Clone, Default)]
pub struct SandboxSchema {
    /// The root application's entry, kept apart from the plugins.
    pub application: Option<CrateSchema>,
    /// Plugin entries keyed by canonical code.
    pub plugins: HashMap<String, CrateSchema>,
}

/// The composite schema tree for bundle (application + plugins) validation.
#[derive(Debug, Clone, Default)]
pub struct BundleSchema {
    /// Reserved for profile-side schemas; currently always empty.
    pub profile: HashMap<String, CrateSchema>,
    pub sandbox: SandboxSchema,
}

/// Schema entry for one bridge.
#[derive(Debug, Clone)]
pub struct BridgeSchemaEntry {
    /// Fully-qualified bridge name.
    pub crate_scope: String,
    /// Validation enabled; a bridge may opt out through its presets.
    pub enabled: bool,
    /// Declared schema for one descriptor, when the bridge has a manifest.
    pub schema: Option<Value>,
}

/// Combine the manifests of the application and the plugins into one
/// composite schema tree keyed by canonical code.
///
/// The root application's entry (when it declares a manifest) is kept at
/// `sandbox.application`, not under `plugins`. Bridges and the framework do
/// not participate here.
pub fn combine_bundle_schema(
    refs: &[ComponentRef],
    manifests: &HashMap<String, Manifest>,
) -> BundleSchema {
    let mut bundle = BundleSchema::default();

    for r in refs {
        let Some(manifest) = manifests.get(&r.name) else {
            continue;
        };
        let entry = CrateSchema {
            crate_scope: r.name.clone(),
            schema: manifest.validation.schema.clone(),
            bridge_depends: r.bridge_depends.clone(),
            plugin_depends: r.plugin_depends.clone(),
            check_constraints: manifest.validation.check_constraints.clone(),
        };
        match r.kind {
            ComponentKind::Application => {
                bundle.sandbox.application = Some(entry);
            }
            ComponentKind::Plugin => {
                bundle.sandbox.plugins.insert(r.code.clone(), entry);
            }
            ComponentKind::Framework | ComponentKind::Bridge => {}
        }
    }
    bundle
}

/// Combine the bridge manifests into per-bridge schema entries.
///
/// The default entry is validation-enabled with no schema; a bridge whose
/// presets explicitly disable schema validation yields a disabled entry; a
/// bridge with a manifest contributes its declared schema.
pub fn combine_bridge_schema(
    refs: &[ComponentRef],
    manifests: &HashMap<String, Manifest>,
) -> HashMap<String, BridgeSchemaEntry> {
    let mut entries = HashMap::new();

    for r in refs.iter().filter(|r| r.kind == ComponentKind::Bridge) {
        let mut entry = BridgeSchemaEntry {
            crate_scope: r.name.clone(),
            enabled: true,
            schema: None,
        };
        if r.presets.schema_validation == Some(false) {
            entry.enabled = false;
        } else if let Some(manifest) = manifests.get(&r.name) {
            entry.schema = Some(manifest.validation.schema.clone());
        }
        entries.insert(r.code.clone(), entry);
    }
    entries
}
