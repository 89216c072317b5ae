//! Immutable validation records appended by the bootstrap stages.

use serde::{Deserialize, Serialize};

/// Bootstrap stage a record originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Manifest shape check against the meta-schema.
    #[serde(rename = "manifest")]
    Manifest,
    /// Loading/parsing of a configuration file.
    #[serde(rename = "config/load")]
    ConfigLoad,
    /// JSON-Schema validation of a merged configuration slice.
    #[serde(rename = "config/schema")]
    ConfigSchema,
    /// Custom constraint check over a dependency-scoped projection.
    #[serde(rename = "config/constraints")]
    ConfigConstraints,
    /// Alias/naming resolution.
    #[serde(rename = "naming")]
    Naming,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::ConfigLoad => "config/load",
            Self::ConfigSchema => "config/schema",
            Self::ConfigConstraints => "config/constraints",
            Self::Naming => "naming",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of the crate (addressable configuration scope) a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrateKind {
    Application,
    Framework,
    Plugin,
    Bridge,
}

impl CrateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Plugin => "plugin",
            Self::Bridge => "bridge",
        }
    }
}

impl std::fmt::Display for CrateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One validation outcome for one crate at one stage.
///
/// Records are immutable once created and are appended for passing checks as
/// well as failing ones, so callers always see the full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Stage that produced the record.
    pub stage: Stage,
    /// Kind of the crate the record refers to.
    #[serde(rename = "type")]
    pub kind: CrateKind,
    /// Fully-qualified crate name.
    pub name: String,
    /// Whether the check failed.
    pub has_error: bool,
    /// Human-readable failure detail, present when `has_error` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ValidationResult {
    /// Create a passing record.
    pub fn ok(stage: Stage, kind: CrateKind, name: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            name: name.into(),
            has_error: false,
            stack: None,
        }
    }

    /// Create a failing record with detail.
    pub fn error(
        stage: Stage,
        kind: CrateKind,
        name: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            kind,
            name: name.into(),
            has_error: true,
            stack: Some(stack.into()),
        }
    }
}
