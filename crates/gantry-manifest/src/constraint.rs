//! Custom constraint checks.
//!
//! Manifest files are data and cannot carry functions, so a component's
//! `checkConstraints` logic is Rust code registered by the hosting
//! application under the component's full name. The registered callback is
//! attached to the component's manifest when it is loaded.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A custom constraint check over a dependency-scoped configuration view.
///
/// Receives the projection `{application?, plugins, bridges}` limited to the
/// declaring crate and its declared dependencies. Returns `Ok(true)` when the
/// configuration is acceptable; `Ok(false)` or `Err` become a
/// `config/constraints` validation error.
pub type ConstraintFn = Arc<dyn Fn(&Value) -> Result<bool, String> + Send + Sync>;

/// Registry of constraint checks keyed by component full name.
#[derive(Default, Clone)]
pub struct ConstraintRegistry {
    checks: HashMap<String, ConstraintFn>,
}

impl ConstraintRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constraint check for a component.
    ///
    /// A second registration under the same name replaces the first.
    pub fn register<F>(&mut self, component_name: impl Into<String>, check: F)
    where
        F: Fn(&Value) -> Result<bool, String> + Send + Sync + 'static,
    {
        self.checks.insert(component_name.into(), Arc::new(check));
    }

    /// Look up the check registered for a component.
    pub fn get(&self, component_name: &str) -> Option<&ConstraintFn> {
        self.checks.get(component_name)
    }

    /// Whether any check is registered for a component.
    pub fn contains(&self, component_name: &str) -> bool {
        self.checks.contains_key(component_name)
    }
}

impl std::fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ConstraintRegistry")
            .field("components", &names)
            .finish()
    }
}
