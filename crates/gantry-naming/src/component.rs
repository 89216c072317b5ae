//! Component references produced by discovery.

use gantry_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// Kind of an addressable configuration scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Application,
    Framework,
    Plugin,
    Bridge,
}

/// Per-component feature switches declared at discovery time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presets {
    /// A bridge may opt out of schema validation entirely.
    #[serde(default)]
    pub schema_validation: Option<bool>,
}

/// A discovered component: the application, the framework itself, a plugin
/// or a bridge.
///
/// Refs are built once per process bootstrap and never mutated afterwards.
/// The derived fields (`code`, `code_in_camel`, `name_in_camel`) start as
/// copies of `name` and are filled in by
/// [`extract_alias_names`](crate::extract_alias_names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Full package name, the canonical identity.
    pub name: String,
    /// What kind of scope this component is.
    pub kind: ComponentKind,
    /// Root directory of the component on disk.
    #[serde(skip, default = "default_path")]
    pub path: NormalizedPath,
    /// Feature switches declared by the component.
    #[serde(default)]
    pub presets: Presets,
    /// Codes of bridges this component declares as dependencies.
    #[serde(default)]
    pub bridge_depends: Vec<String>,
    /// Codes of plugins this component declares as dependencies.
    #[serde(default)]
    pub plugin_depends: Vec<String>,
    /// Former full names this component was renamed from.
    #[serde(default)]
    pub formers: Vec<String>,
    /// Short canonical identifier, derived from `name` by pattern stripping.
    #[serde(default)]
    pub code: String,
    /// camelCase form of `code`.
    #[serde(default)]
    pub code_in_camel: String,
    /// camelCase form of `name`.
    #[serde(default)]
    pub name_in_camel: String,
}

fn default_path() -> NormalizedPath {
    NormalizedPath::new("")
}

impl ComponentRef {
    /// Create a ref with the derived naming fields initialized to `name`.
    pub fn new(name: impl Into<String>, kind: ComponentKind, path: NormalizedPath) -> Self {
        let name = name.into();
        Self {
            code: name.clone(),
            code_in_camel: name.clone(),
            name_in_camel: name.clone(),
            name,
            kind,
            path,
            presets: Presets::default(),
            bridge_depends: Vec::new(),
            plugin_depends: Vec::new(),
            formers: Vec::new(),
        }
    }

    /// Declare bridge dependencies (by code).
    pub fn with_bridge_depends(mut self, codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.bridge_depends = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Declare plugin dependencies (by code).
    pub fn with_plugin_depends(mut self, codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.plugin_depends = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Declare former names this component was renamed from.
    pub fn with_formers(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.formers = names.into_iter().map(Into::into).collect();
        self
    }

    /// Attach discovery-time feature switches.
    pub fn with_presets(mut self, presets: Presets) -> Self {
        self.presets = presets;
        self
    }

    /// Directory holding this component's bundled configuration files.
    pub fn config_dir(&self) -> NormalizedPath {
        self.path.join(gantry_fs::CONFIG_DIR_NAME)
    }
}
