//! Bidirectional alias tables.
//!
//! The absolute map takes any alias a component has ever been addressable by
//! (full name, camelCase form, code, code in camelCase, and the same four
//! forms of every former name) to the one canonical full name. The relative
//! map is the inverse projection: canonical full name to the component's own
//! preferred short alias, used when configuration is rendered back in a
//! component-local idiom.
//!
//! Both tables are built once from the discovered refs and never mutated.

use crate::camel::camelize;
use crate::component::{ComponentKind, ComponentRef};
use crate::error::{Error, Result};
use crate::extract::derive_code;
use std::collections::{BTreeSet, HashMap};

/// Lookup dimension of the alias tables.
///
/// Owners of bridge configuration (the application, plugins) share one
/// namespace; bridges have their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasScope {
    Plugin,
    Bridge,
}

impl AliasScope {
    /// The scope a component kind registers under.
    pub fn of(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Bridge => Self::Bridge,
            _ => Self::Plugin,
        }
    }
}

/// Two different canonical names claimed the same alias.
///
/// Recorded while building the tables, reported but not fatal; a concrete
/// failure surfaces only when the collided alias is dereferenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConflict {
    pub scope: AliasScope,
    pub alias: String,
    pub claimants: Vec<String>,
}

/// Alias tables for one scope.
#[derive(Debug, Default, Clone)]
struct ScopeTable {
    /// alias -> canonical full names claiming it (one entry when unambiguous)
    absolute: HashMap<String, Vec<String>>,
    /// canonical full name -> preferred short alias
    relative: HashMap<String, String>,
    /// canonical full name -> short code
    codes: HashMap<String, String>,
}

/// The four naming forms of a component name.
fn alias_forms(name: &str, kind: ComponentKind) -> BTreeSet<String> {
    let (code, _) = derive_code(name, kind);
    BTreeSet::from([
        name.to_string(),
        camelize(name),
        camelize(&code),
        code,
    ])
}

/// Resolves aliases to canonical names and back.
#[derive(Debug, Default, Clone)]
pub struct NameResolver {
    plugin: ScopeTable,
    bridge: ScopeTable,
    conflicts: Vec<NamingConflict>,
}

impl NameResolver {
    /// Build the alias tables from the discovered refs.
    ///
    /// Expects refs that already went through
    /// [`extract_alias_names`](crate::extract_alias_names).
    pub fn new(refs: &[ComponentRef]) -> Self {
        let mut resolver = Self::default();

        for r in refs {
            let scope = AliasScope::of(r.kind);
            let mut aliases = alias_forms(&r.name, r.kind);
            for former in &r.formers {
                aliases.extend(alias_forms(former, r.kind));
            }

            let (table, conflicts) = match scope {
                AliasScope::Plugin => (&mut resolver.plugin, &mut resolver.conflicts),
                AliasScope::Bridge => (&mut resolver.bridge, &mut resolver.conflicts),
            };
            table.relative.insert(r.name.clone(), r.code_in_camel.clone());
            table.codes.insert(r.name.clone(), r.code.clone());

            for alias in aliases {
                let claimants = table.absolute.entry(alias.clone()).or_default();
                if !claimants.contains(&r.name) {
                    claimants.push(r.name.clone());
                    if claimants.len() > 1 {
                        tracing::warn!(
                            alias = %alias,
                            claimants = ?claimants,
                            "Alias collision while building absolute alias map"
                        );
                        conflicts.push(NamingConflict {
                            scope,
                            alias,
                            claimants: claimants.clone(),
                        });
                    }
                }
            }
        }
        resolver
    }

    fn table(&self, scope: AliasScope) -> &ScopeTable {
        match scope {
            AliasScope::Plugin => &self.plugin,
            AliasScope::Bridge => &self.bridge,
        }
    }

    /// Absolute-map lookup with identity fallback.
    ///
    /// Unknown aliases resolve to themselves, so components not yet
    /// discovered keep working in a forward-compatible way. A collided alias
    /// is the one case that fails here.
    pub fn original_name_of(&self, alias: &str, scope: AliasScope) -> Result<String> {
        match self.table(scope).absolute.get(alias) {
            None => Ok(alias.to_string()),
            Some(claimants) if claimants.len() == 1 => Ok(claimants[0].clone()),
            Some(claimants) => Err(Error::AmbiguousAlias {
                alias: alias.to_string(),
                claimants: claimants.clone(),
            }),
        }
    }

    /// Resolve an alias to the owning component's short code.
    ///
    /// Falls back to the resolved name itself when the component is unknown.
    pub fn code_of(&self, alias: &str, scope: AliasScope) -> Result<String> {
        let name = self.original_name_of(alias, scope)?;
        Ok(self
            .table(scope)
            .codes
            .get(&name)
            .cloned()
            .unwrap_or(name))
    }

    /// Inverse projection: the preferred short alias of a canonical name.
    pub fn relative_alias_of(&self, canonical_name: &str, scope: AliasScope) -> Option<&str> {
        self.table(scope)
            .relative
            .get(canonical_name)
            .map(String::as_str)
    }

    /// Whether any component claims this alias.
    pub fn is_known(&self, alias: &str, scope: AliasScope) -> bool {
        self.table(scope)
            .absolute
            .get(alias)
            .is_some_and(|c| !c.is_empty())
    }

    /// Collisions recorded while the maps were built.
    pub fn conflicts(&self) -> &[NamingConflict] {
        &self.conflicts
    }
}

/// Build just the absolute map for one scope: alias to claiming canonical
/// names (a single claimant when unambiguous).
///
/// Pure convenience over [`NameResolver::new`] for callers and tests that
/// want the raw table.
pub fn build_absolute_alias_map(
    refs: &[ComponentRef],
    scope: AliasScope,
) -> HashMap<String, Vec<String>> {
    NameResolver::new(refs).table(scope).absolute.clone()
}

/// Build just the relative map for one scope: canonical full name to the
/// component's preferred short alias.
pub fn build_relative_alias_map(
    refs: &[ComponentRef],
    scope: AliasScope,
) -> HashMap<String, String> {
    NameResolver::new(refs).table(scope).relative.clone()
}
