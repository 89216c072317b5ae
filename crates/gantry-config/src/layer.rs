//! Configuration layer and tree snapshot types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three configuration types resolved during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    Profile,
    Sandbox,
    Texture,
}

impl ConfigType {
    /// The default top-level label (and file base name) of this type.
    /// Deployments may rename it through the environment.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Sandbox => "sandbox",
            Self::Texture => "texture",
        }
    }
}

impl std::fmt::Display for ConfigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_label())
    }
}

/// One resolved configuration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigLayer {
    /// Labels this layer is addressable by: the default label plus any
    /// environment-driven rename.
    pub names: Vec<String>,
    /// Merge of the base sources with first-write-wins, deep-fill semantics.
    /// Computed without any caller-supplied overlay labels.
    pub default: Value,
    /// Merge of the same sources with last-write-wins, deep-override
    /// semantics, plus the overlay fragments in caller-specified order.
    pub mixture: Value,
}

impl ConfigLayer {
    /// An empty layer carrying only its labels.
    pub fn empty(names: Vec<String>) -> Self {
        Self {
            names,
            default: Value::Object(Default::default()),
            mixture: Value::Object(Default::default()),
        }
    }
}

/// The read-only configuration snapshot produced by one `load()` call.
///
/// There are no in-place edits after load; a future reload recomputes a
/// whole new tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigTree {
    pub profile: ConfigLayer,
    pub sandbox: ConfigLayer,
    pub texture: ConfigLayer,
}

impl ConfigTree {
    /// The layer for a given config type.
    pub fn layer(&self, config_type: ConfigType) -> &ConfigLayer {
        match config_type {
            ConfigType::Profile => &self.profile,
            ConfigType::Sandbox => &self.sandbox,
            ConfigType::Texture => &self.texture,
        }
    }
}
