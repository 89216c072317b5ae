//! Canonicalization of cross-component reference blocks.
//!
//! A `bridges` sub-tree inside sandbox configuration may be authored in
//! three shapes:
//!
//! - bridge-keyed: `bridge -> owner-or-wildcard -> ref -> descriptor`,
//! - legacy flat: `ref -> bridge -> descriptor` (no owner),
//! - either of the above with any alias form of the names involved.
//!
//! [`transform_config`] rewrites every bridge name and owner name through the
//! absolute alias map into the canonical bridge-keyed shape, filing ownerless
//! entries under the wildcard owner. [`alias_rendered_view`] is the inverse
//! projection into relative aliases; the round trip is lossless for any
//! well-formed input.

use crate::error::Result;
use crate::layer::ConfigType;
use gantry_fs::constants::WILDCARD_OWNER;
use gantry_naming::{AliasScope, NameResolver};
use serde_json::{Map, Value};

/// Canonicalize one loaded configuration fragment.
///
/// Only sandbox fragments carry cross-component sections; profile and
/// texture fragments pass through unchanged. Within a sandbox fragment the
/// top-level `plugins` keys are rewritten to canonical plugin codes and the
/// `bridges` sub-tree to the canonical bridge-keyed shape.
pub fn transform_config(
    resolver: &NameResolver,
    config_type: ConfigType,
    fragment: Value,
) -> Result<Value> {
    if config_type != ConfigType::Sandbox {
        return Ok(fragment);
    }
    let mut root = match fragment {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    if let Some(plugins) = root.remove("plugins") {
        root.insert("plugins".into(), canonicalize_plugin_keys(resolver, plugins)?);
    }
    if let Some(bridges) = root.remove("bridges") {
        root.insert("bridges".into(), canonicalize_bridges(resolver, &bridges)?);
    }
    Ok(Value::Object(root))
}

/// Rewrite the keys of a `plugins` section to canonical plugin codes.
fn canonicalize_plugin_keys(resolver: &NameResolver, plugins: Value) -> Result<Value> {
    let map = match plugins {
        Value::Object(map) => map,
        other => return Ok(other),
    };
    let mut out = Map::new();
    for (alias, config) in map {
        let code = resolver.code_of(&alias, AliasScope::Plugin)?;
        merge_entry(&mut out, code, config);
    }
    Ok(Value::Object(out))
}

/// Rewrite a `bridges` sub-tree into the canonical
/// `bridge-code -> owner-code-or-wildcard -> ref -> descriptor` shape.
///
/// A top-level key that resolves to a discovered bridge selects the
/// bridge-keyed reading; any other key is a legacy ref name whose children
/// are bridge names, filed under the wildcard owner.
pub fn canonicalize_bridges(resolver: &NameResolver, bridges: &Value) -> Result<Value> {
    let Value::Object(map) = bridges else {
        return Ok(bridges.clone());
    };
    let mut out = Map::new();

    for (key, sub) in map {
        if resolver.is_known(key, AliasScope::Bridge) {
            let bridge_code = resolver.code_of(key, AliasScope::Bridge)?;
            let owners = canonicalize_owners(resolver, sub)?;
            merge_entry(&mut out, bridge_code, owners);
        } else {
            // Legacy flat shape: `key` is a ref name, children are bridges.
            let ref_name = key;
            let Value::Object(by_bridge) = sub else {
                merge_entry(&mut out, ref_name.clone(), sub.clone());
                continue;
            };
            for (bridge_alias, descriptor) in by_bridge {
                let bridge_code = resolver.code_of(bridge_alias, AliasScope::Bridge)?;
                let slot = out
                    .entry(bridge_code)
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(owners) = slot {
                    let wildcard = owners
                        .entry(WILDCARD_OWNER.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(refs) = wildcard {
                        refs.insert(ref_name.clone(), descriptor.clone());
                    }
                }
            }
        }
    }
    Ok(Value::Object(out))
}

/// Canonicalize the owner level of a bridge-keyed entry.
fn canonicalize_owners(resolver: &NameResolver, owners: &Value) -> Result<Value> {
    let Value::Object(map) = owners else {
        return Ok(owners.clone());
    };
    let mut out = Map::new();
    for (owner_alias, refs) in map {
        let owner_code = if owner_alias == WILDCARD_OWNER {
            WILDCARD_OWNER.to_string()
        } else {
            resolver.code_of(owner_alias, AliasScope::Plugin)?
        };
        merge_entry(&mut out, owner_code, refs.clone());
    }
    Ok(Value::Object(out))
}

/// Render a canonical `bridges` sub-tree in a component's preferred relative
/// aliases (the inverse of canonicalization).
///
/// Bridge and owner keys are projected through the relative alias map; ref
/// names, descriptors and the wildcard owner are carried unchanged. Unknown
/// codes keep their canonical spelling, so the projection is total.
pub fn alias_rendered_view(resolver: &NameResolver, bridges: &Value) -> Value {
    let Value::Object(map) = bridges else {
        return bridges.clone();
    };
    let mut out = Map::new();
    for (bridge_code, owners) in map {
        let bridge_alias = preferred_alias(resolver, bridge_code, AliasScope::Bridge);
        let rendered_owners = match owners {
            Value::Object(owner_map) => {
                let mut rendered = Map::new();
                for (owner_code, refs) in owner_map {
                    let owner_alias = if owner_code == WILDCARD_OWNER {
                        WILDCARD_OWNER.to_string()
                    } else {
                        preferred_alias(resolver, owner_code, AliasScope::Plugin)
                    };
                    rendered.insert(owner_alias, refs.clone());
                }
                Value::Object(rendered)
            }
            other => other.clone(),
        };
        out.insert(bridge_alias, rendered_owners);
    }
    Value::Object(out)
}

/// The preferred relative alias of a (possibly aliased) name, falling back
/// to the input itself when the component is unknown or the alias collided.
fn preferred_alias(resolver: &NameResolver, alias: &str, scope: AliasScope) -> String {
    resolver
        .original_name_of(alias, scope)
        .ok()
        .and_then(|canonical| {
            resolver
                .relative_alias_of(&canonical, scope)
                .map(str::to_string)
        })
        .unwrap_or_else(|| alias.to_string())
}

/// Insert or deep-combine an entry while canonicalizing, so two alias
/// spellings of the same component merge instead of clobbering each other.
fn merge_entry(out: &mut Map<String, Value>, key: String, value: Value) {
    match out.get_mut(&key) {
        Some(existing) => crate::merge::deep_override(existing, &value),
        None => {
            out.insert(key, value);
        }
    }
}
