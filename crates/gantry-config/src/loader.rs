//! Layered configuration loading.
//!
//! One `load()` call reads every fragment in a fixed precedence order and
//! produces the read-only [`ConfigTree`] snapshot. Fragments are read
//! sequentially because later reads must be able to override earlier ones
//! deterministically.
//!
//! Base source order per config type: application config dir first, then
//! each dependency-ordered plugin's bundled config dir, then the framework's
//! own config dir. The `default` side folds these with first-write-wins
//! semantics (the application wins), the `mixture` side with last-write-wins
//! semantics, followed by the overlay fragments: for each overlay directory
//! (application-local, then the externally-selected directory) the base file
//! first, then one file per sandbox label in the exact order supplied.

use crate::env::EnvOptions;
use crate::layer::{ConfigLayer, ConfigTree, ConfigType};
use crate::merge::{deep_fill, deep_override};
use crate::transform::transform_config;
use gantry_fs::{ConfigSource, NormalizedPath};
use gantry_issue::{CrateKind, IssueInspector, Stage, ValidationResult};
use gantry_naming::{ComponentKind, ComponentRef, NameResolver};
use serde_json::Value;

/// Loads and merges all configuration fragments into a [`ConfigTree`].
pub struct ConfigLoader<'a> {
    resolver: &'a NameResolver,
    application: &'a ComponentRef,
    framework: &'a ComponentRef,
    /// Dependency-ordered plugins, duplicates already removed by discovery.
    plugins: &'a [ComponentRef],
    env: EnvOptions,
    /// Caller-supplied sandbox labels, applied after the environment's.
    /// Order is significant and never normalized.
    private_sandbox_labels: Vec<String>,
    source: ConfigSource,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(
        resolver: &'a NameResolver,
        application: &'a ComponentRef,
        framework: &'a ComponentRef,
        plugins: &'a [ComponentRef],
        env: EnvOptions,
    ) -> Self {
        Self {
            resolver,
            application,
            framework,
            plugins,
            env,
            private_sandbox_labels: Vec::new(),
            source: ConfigSource::new(),
        }
    }

    /// Supply private sandbox labels, folded in after the environment's
    /// labels in exactly this order.
    pub fn with_private_sandbox_labels(
        mut self,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.private_sandbox_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Load all three configuration types.
    ///
    /// Never fails as a whole: malformed fragments are reported through the
    /// inspector and excluded from the merge.
    pub fn load(&self, inspector: &mut IssueInspector) -> ConfigTree {
        ConfigTree {
            profile: self.load_layer(ConfigType::Profile, inspector),
            sandbox: self.load_layer(ConfigType::Sandbox, inspector),
            texture: self.load_layer(ConfigType::Texture, inspector),
        }
    }

    fn load_layer(&self, config_type: ConfigType, inspector: &mut IssueInspector) -> ConfigLayer {
        let label = self.env.label_of(config_type);
        let mut names = vec![config_type.default_label().to_string()];
        if label != config_type.default_label() {
            names.push(label.clone());
        }

        // Base sources in fixed precedence order.
        let mut fragments = Vec::new();
        let base_refs = std::iter::once(self.application)
            .chain(self.plugins.iter())
            .chain(std::iter::once(self.framework));
        for r in base_refs {
            tracing::debug!(component = %r.name, config_type = %config_type, "Loading base config");
            if let Some(fragment) = self.load_fragment(
                &r.config_dir(),
                &label,
                config_type,
                kind_of(r.kind),
                &r.name,
                inspector,
            ) {
                fragments.push(fragment);
            }
        }

        let mut default = Value::Object(Default::default());
        for fragment in &fragments {
            deep_fill(&mut default, fragment);
        }
        let mut mixture = Value::Object(Default::default());
        for fragment in &fragments {
            deep_override(&mut mixture, fragment);
        }

        // Overlay fragments, mixture only: application-local directory first,
        // then the externally-selected directory, base file then label files.
        let labels: Vec<&str> = if config_type == ConfigType::Sandbox {
            self.env
                .sandbox_labels
                .iter()
                .chain(self.private_sandbox_labels.iter())
                .map(String::as_str)
                .collect()
        } else {
            Vec::new()
        };

        // The application directory's base file already participated in the
        // base ordering; only the external directory contributes a base file
        // here.
        let mut overlay_dirs = vec![(self.application.config_dir(), false)];
        if let Some(external) = self.env.external_config_dir() {
            overlay_dirs.push((external, true));
        }
        for (dir, include_base) in &overlay_dirs {
            if *include_base {
                if let Some(fragment) = self.load_fragment(
                    dir,
                    &label,
                    config_type,
                    CrateKind::Application,
                    dir.as_str(),
                    inspector,
                ) {
                    deep_override(&mut mixture, &fragment);
                }
            }
            for overlay_label in &labels {
                let base_name = format!("{label}_{overlay_label}");
                if let Some(fragment) = self.load_fragment(
                    dir,
                    &base_name,
                    config_type,
                    CrateKind::Application,
                    dir.as_str(),
                    inspector,
                ) {
                    tracing::debug!(dir = %dir, label = %overlay_label, "Applied overlay");
                    deep_override(&mut mixture, &fragment);
                }
            }
        }

        ConfigLayer {
            names,
            default,
            mixture,
        }
    }

    /// Load and canonicalize one fragment.
    ///
    /// A missing file is an empty contribution (`None`, skipped). A file
    /// that fails to load or canonicalize is reported and excluded.
    fn load_fragment(
        &self,
        dir: &NormalizedPath,
        base_name: &str,
        config_type: ConfigType,
        origin_kind: CrateKind,
        origin_name: &str,
        inspector: &mut IssueInspector,
    ) -> Option<Value> {
        match self.source.load_value(dir, base_name) {
            Ok(None) => None,
            Ok(Some(raw)) => match transform_config(self.resolver, config_type, raw) {
                Ok(fragment) => Some(fragment),
                Err(e) => {
                    inspector.collect(ValidationResult::error(
                        Stage::Naming,
                        origin_kind,
                        origin_name,
                        e.to_string(),
                    ));
                    None
                }
            },
            Err(e) => {
                inspector.collect(ValidationResult::error(
                    Stage::ConfigLoad,
                    origin_kind,
                    origin_name,
                    e.to_string(),
                ));
                None
            }
        }
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
