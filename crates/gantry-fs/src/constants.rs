//! Constants and environment variable names for the bootstrap filesystem.

/// Name of the framework itself, used as its canonical component name.
pub const FRAMEWORK_NAME: &str = "gantry";

/// Directory (relative to a component root) holding its configuration files.
pub const CONFIG_DIR_NAME: &str = "config";

/// File base name of a component manifest.
pub const MANIFEST_BASE_NAME: &str = "manifest";

/// Extensions probed when loading a configuration object, in priority order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// Wildcard owner key for bridge entries with no declared owner.
pub const WILDCARD_OWNER: &str = "*";

/// Environment variables recognized by the configuration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvName {
    /// Externally-selected configuration directory.
    ConfigDir,
    /// Environment sub-directory selector inside the external directory.
    ConfigEnv,
    /// Comma-separated, ordered list of sandbox overlay labels.
    Sandbox,
    /// Rename of the `profile` top-level label.
    ProfileName,
    /// Rename of the `sandbox` top-level label.
    SandboxName,
    /// Rename of the `texture` top-level label.
    TextureName,
}

impl EnvName {
    /// Get the variable name as it appears in the process environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigDir => "GANTRY_CONFIG_DIR",
            Self::ConfigEnv => "GANTRY_CONFIG_ENV",
            Self::Sandbox => "GANTRY_SANDBOX",
            Self::ProfileName => "GANTRY_CONFIG_PROFILE_NAME",
            Self::SandboxName => "GANTRY_CONFIG_SANDBOX_NAME",
            Self::TextureName => "GANTRY_CONFIG_TEXTURE_NAME",
        }
    }
}

impl std::fmt::Display for EnvName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
