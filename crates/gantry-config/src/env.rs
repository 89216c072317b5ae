//! Environment-driven configuration selection.
//!
//! The process environment selects an external configuration directory, an
//! environment sub-directory inside it, the ordered sandbox overlay labels,
//! and optional renames of the profile/sandbox/texture labels themselves.
//!
//! `EnvOptions` is a plain snapshot so tests construct it directly instead of
//! mutating the process environment.

use crate::layer::ConfigType;
use gantry_fs::{EnvName, NormalizedPath};

/// Snapshot of the `GANTRY_*` configuration environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOptions {
    /// Externally-selected configuration directory (`GANTRY_CONFIG_DIR`).
    pub config_dir: Option<NormalizedPath>,
    /// Environment sub-directory selector (`GANTRY_CONFIG_ENV`).
    pub config_env: Option<String>,
    /// Ordered sandbox overlay labels (`GANTRY_SANDBOX`, comma-separated).
    /// Order is significant and is never normalized or sorted.
    pub sandbox_labels: Vec<String>,
    /// Rename of the `profile` label (`GANTRY_CONFIG_PROFILE_NAME`).
    pub profile_name: Option<String>,
    /// Rename of the `sandbox` label (`GANTRY_CONFIG_SANDBOX_NAME`).
    pub sandbox_name: Option<String>,
    /// Rename of the `texture` label (`GANTRY_CONFIG_TEXTURE_NAME`).
    pub texture_name: Option<String>,
}

impl EnvOptions {
    /// Read the snapshot from the process environment.
    pub fn from_env() -> Self {
        let var = |name: EnvName| std::env::var(name.as_str()).ok().filter(|v| !v.is_empty());
        Self {
            config_dir: var(EnvName::ConfigDir).map(NormalizedPath::new),
            config_env: var(EnvName::ConfigEnv),
            sandbox_labels: var(EnvName::Sandbox)
                .map(|raw| split_labels(&raw))
                .unwrap_or_default(),
            profile_name: var(EnvName::ProfileName),
            sandbox_name: var(EnvName::SandboxName),
            texture_name: var(EnvName::TextureName),
        }
    }

    /// Effective top-level label (and file base name) for a config type.
    pub fn label_of(&self, config_type: ConfigType) -> String {
        let rename = match config_type {
            ConfigType::Profile => &self.profile_name,
            ConfigType::Sandbox => &self.sandbox_name,
            ConfigType::Texture => &self.texture_name,
        };
        rename
            .clone()
            .unwrap_or_else(|| config_type.default_label().to_string())
    }

    /// The externally-selected override directory, if one can be determined.
    ///
    /// `GANTRY_CONFIG_DIR` wins; otherwise the platform config directory
    /// (`~/.config/gantry` on Linux) is used. The `GANTRY_CONFIG_ENV`
    /// sub-directory is appended when set.
    pub fn external_config_dir(&self) -> Option<NormalizedPath> {
        let base = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => NormalizedPath::new(dirs::config_dir()?.join("gantry")),
        };
        Some(match &self.config_env {
            Some(env) => base.join(env),
            None => base,
        })
    }
}

/// Split a comma-separated label list, preserving order, dropping empties.
fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
