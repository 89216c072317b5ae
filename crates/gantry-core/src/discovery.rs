//! Input types from the discovery collaborator.
//!
//! Discovery (the filesystem walk over plugin and bridge directories) is an
//! external concern; this module defines what it hands the bootstrap: an
//! ordered set of component refs, plus a helper to flatten nested plugin
//! dependency trees into the dependency order the configuration engine
//! expects.

use gantry_naming::ComponentRef;

/// Everything discovery hands to the bootstrap.
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// The hosting application.
    pub application: ComponentRef,
    /// The framework's self-reference.
    pub framework: ComponentRef,
    /// Plugins, depth-first expanded with duplicates removed (first
    /// occurrence kept).
    pub plugins: Vec<ComponentRef>,
    /// Bridges in declaration order.
    pub bridges: Vec<ComponentRef>,
}

/// One node of a nested plugin dependency tree.
#[derive(Debug, Clone)]
pub struct PluginNode {
    pub component: ComponentRef,
    pub depends: Vec<PluginNode>,
}

impl PluginNode {
    pub fn leaf(component: ComponentRef) -> Self {
        Self {
            component,
            depends: Vec::new(),
        }
    }

    pub fn with_depends(component: ComponentRef, depends: Vec<PluginNode>) -> Self {
        Self { component, depends }
    }
}

/// Flatten a plugin dependency forest depth-first, keeping the first
/// occurrence of every plugin name.
///
/// The resulting order is the dependency order used for configuration
/// merging, so it must be deterministic for a given forest.
pub fn flatten_plugin_order(forest: &[PluginNode]) -> Vec<ComponentRef> {
    let mut seen = std::collections::HashSet::new();
    let mut ordered = Vec::new();
    for node in forest {
        flatten_into(node, &mut seen, &mut ordered);
    }
    ordered
}

fn flatten_into(
    node: &PluginNode,
    seen: &mut std::collections::HashSet<String>,
    ordered: &mut Vec<ComponentRef>,
) {
    if seen.insert(node.component.name.clone()) {
        ordered.push(node.component.clone());
    }
    for child in &node.depends {
        flatten_into(child, seen, ordered);
    }
}
