//! The bootstrap driver.
//!
//! Runs once at process start: name resolution, configuration loading,
//! manifest validation, barrier. Single-threaded and synchronous; the
//! outputs (alias tables, config tree) are write-once snapshots.

use crate::discovery::DiscoveryOutcome;
use crate::error::Result;
use gantry_config::{ConfigLoader, ConfigTree, EnvOptions};
use gantry_issue::{
    BarrierOptions, CrateKind, IssueInspector, IssueSummary, Stage, ValidationResult,
};
use gantry_manifest::{ConstraintRegistry, ManifestHandler};
use gantry_naming::{AliasScope, ComponentRef, NameResolver, extract_alias_names};

/// Everything a successful bootstrap hands to the rest of the process.
#[derive(Debug)]
pub struct BootOutcome {
    /// All refs with their derived naming fields, in load order:
    /// application, plugins, bridges, framework.
    pub refs: Vec<ComponentRef>,
    /// The process-wide alias tables.
    pub resolver: NameResolver,
    /// The read-only configuration snapshot.
    pub config: ConfigTree,
    /// Every collected validation record, passing and failing alike.
    pub records: Vec<ValidationResult>,
    /// Aggregate of the error records.
    pub summary: IssueSummary,
    /// Component names no code-derivation pattern matched.
    pub unmatched_names: Vec<String>,
}

/// Builder for one bootstrap run.
pub struct Bootstrap {
    discovery: DiscoveryOutcome,
    constraints: ConstraintRegistry,
    env: Option<EnvOptions>,
    private_sandbox_labels: Vec<String>,
    exit_on_error: bool,
}

impl Bootstrap {
    pub fn new(discovery: DiscoveryOutcome) -> Self {
        Self {
            discovery,
            constraints: ConstraintRegistry::new(),
            env: None,
            private_sandbox_labels: Vec::new(),
            exit_on_error: true,
        }
    }

    /// Register the components' custom constraint checks.
    pub fn with_constraints(mut self, constraints: ConstraintRegistry) -> Self {
        self.constraints = constraints;
        self
    }

    /// Supply an environment snapshot instead of reading the process
    /// environment.
    pub fn with_env(mut self, env: EnvOptions) -> Self {
        self.env = Some(env);
        self
    }

    /// Caller-supplied sandbox overlay labels, applied after the
    /// environment's labels in exactly this order.
    pub fn with_private_sandbox_labels(
        mut self,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.private_sandbox_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a barrier that found errors ends the bootstrap (default) or
    /// merely reports.
    pub fn with_exit_on_error(mut self, exit_on_error: bool) -> Self {
        self.exit_on_error = exit_on_error;
        self
    }

    /// Run the whole bootstrap.
    ///
    /// Every stage collects instead of throwing; the single barrier at the
    /// end converts the accumulated errors into the returned error. Even
    /// then, the summary inside it carries the complete set of problems from
    /// this one pass.
    pub fn run(self) -> Result<BootOutcome> {
        let env = self.env.unwrap_or_else(EnvOptions::from_env);
        let mut inspector = IssueInspector::new();

        // Assemble the full ref list in load order and derive alias names.
        let plugin_count = self.discovery.plugins.len();
        let bridge_count = self.discovery.bridges.len();
        let mut all = Vec::with_capacity(2 + plugin_count + bridge_count);
        all.push(self.discovery.application);
        all.extend(self.discovery.plugins);
        all.extend(self.discovery.bridges);
        all.push(self.discovery.framework);

        let extraction = extract_alias_names(all);
        let refs = extraction.refs;
        let unmatched_names = extraction.unmatched;

        let resolver = NameResolver::new(&refs);
        for conflict in resolver.conflicts() {
            // Reported, not fatal here; dereferencing the alias is what fails.
            inspector.collect(ValidationResult {
                stage: Stage::Naming,
                kind: match conflict.scope {
                    AliasScope::Bridge => CrateKind::Bridge,
                    AliasScope::Plugin => CrateKind::Plugin,
                },
                name: conflict.alias.clone(),
                has_error: false,
                stack: Some(format!(
                    "alias claimed by: {}",
                    conflict.claimants.join(", ")
                )),
            });
        }

        let application = &refs[0];
        let plugins = &refs[1..1 + plugin_count];
        let framework = &refs[refs.len() - 1];

        tracing::debug!(
            plugins = plugin_count,
            bridges = bridge_count,
            "Loading configuration"
        );
        let loader = ConfigLoader::new(&resolver, application, framework, plugins, env)
            .with_private_sandbox_labels(self.private_sandbox_labels);
        let config = loader.load(&mut inspector);

        let handler = ManifestHandler::new(self.constraints);
        let manifests = handler.load_all(&refs, &mut inspector);
        handler.validate_config(&config, &refs, &manifests, &mut inspector);

        inspector.barrier(BarrierOptions {
            exit_on_error: self.exit_on_error,
        })?;

        Ok(BootOutcome {
            summary: inspector.examine(),
            records: inspector.records().to_vec(),
            refs,
            resolver,
            config,
            unmatched_names,
        })
    }
}
