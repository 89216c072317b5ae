//! Format-agnostic configuration loading
//!
//! [`ConfigSource`] is the "load a named configuration object from a given
//! path, or nothing if absent" capability the configuration engine is built
//! against. It is decoupled from any particular file format: TOML, JSON and
//! YAML documents are all parsed into one `serde_json::Value` tree so the
//! merge and validation layers operate on a single representation.

use crate::constants::SUPPORTED_EXTENSIONS;
use crate::{Error, NormalizedPath, Result, io};
use serde_json::Value;

/// Format-agnostic configuration source.
///
/// Format is detected from the file extension. A missing file is not an
/// error: callers receive `Ok(None)` and decide what absence means (during
/// bootstrap it means "empty object"). A file that exists but fails to parse
/// is an error, which callers surface as a fatal bootstrap issue.
#[derive(Debug, Default)]
pub struct ConfigSource;

impl ConfigSource {
    /// Create a new ConfigSource.
    pub fn new() -> Self {
        Self
    }

    /// Load `<dir>/<base_name>.<ext>` for the first supported extension that
    /// exists on disk.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory to probe
    /// * `base_name` - File name without extension (e.g. `sandbox`,
    ///   `sandbox_staging`)
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` for the first candidate found, `Ok(None)` when no
    /// candidate exists, or a parse error.
    pub fn load_value(&self, dir: &NormalizedPath, base_name: &str) -> Result<Option<Value>> {
        for ext in SUPPORTED_EXTENSIONS {
            let candidate = dir.join(&format!("{base_name}.{ext}"));
            if candidate.is_file() {
                tracing::debug!(path = %candidate, "Loading config object");
                return self.load_file(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Load a concrete file into a JSON value tree.
    pub fn load_file(&self, path: &NormalizedPath) -> Result<Value> {
        let content = io::read_text(path)?;
        let extension = path.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => {
                let value: toml::Value =
                    toml::from_str(&content).map_err(|e| Error::ConfigParse {
                        path: path.to_native(),
                        format: "TOML".into(),
                        message: e.to_string(),
                    })?;
                serde_json::to_value(value).map_err(|e| Error::ConfigParse {
                    path: path.to_native(),
                    format: "TOML".into(),
                    message: e.to_string(),
                })
            }
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}
