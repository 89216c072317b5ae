//! Short-code derivation from full component names.
//!
//! A component's `code` is derived by testing an ordered list of full-match
//! patterns against its name and taking the first pattern that matches. When
//! no pattern matches the name is kept unchanged as the code; that outcome is
//! collected in [`AliasExtraction::unmatched`] and logged, so it stays
//! observable without rejecting the component.

use crate::camel::camelize;
use crate::component::{ComponentKind, ComponentRef};
use regex::Regex;
use std::sync::OnceLock;

/// Ordered full-match patterns stripping the known namespace prefixes from
/// plugin names. The first match wins.
fn plugin_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"^gantry-plugin-([a-z][a-z0-9-]*)$").unwrap(),
            Regex::new(r"^app-plugin-([a-z][a-z0-9-]*)$").unwrap(),
        ]
    })
}

/// Ordered full-match patterns for bridge names.
fn bridge_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"^gantry-bridge-([a-z][a-z0-9-]*)$").unwrap(),
            Regex::new(r"^app-bridge-([a-z][a-z0-9-]*)$").unwrap(),
        ]
    })
}

/// Derive the short code for a name of the given kind.
///
/// Returns `(code, matched)`: applications and the framework always keep
/// their name as code (trivially matched); plugins and bridges strip the
/// first matching namespace prefix, or keep the name with `matched = false`.
pub fn derive_code(name: &str, kind: ComponentKind) -> (String, bool) {
    let patterns = match kind {
        ComponentKind::Application | ComponentKind::Framework => return (name.to_string(), true),
        ComponentKind::Plugin => plugin_patterns(),
        ComponentKind::Bridge => bridge_patterns(),
    };
    for pattern in patterns {
        if let Some(caps) = pattern.captures(name) {
            return (caps[1].to_string(), true);
        }
    }
    (name.to_string(), false)
}

/// Outcome of alias-name extraction over a set of refs.
#[derive(Debug, Clone)]
pub struct AliasExtraction {
    /// The refs with `code`, `code_in_camel` and `name_in_camel` filled in.
    pub refs: Vec<ComponentRef>,
    /// Names for which no code-derivation pattern matched. Their code stayed
    /// equal to the name; this list keeps the outcome observable.
    pub unmatched: Vec<String>,
}

/// Fill in the derived naming fields for every ref.
///
/// Derivation never fails: a name no pattern matches keeps `code = name` and
/// is reported through [`AliasExtraction::unmatched`] and a warning.
pub fn extract_alias_names(refs: Vec<ComponentRef>) -> AliasExtraction {
    let mut unmatched = Vec::new();
    let refs = refs
        .into_iter()
        .map(|mut r| {
            let (code, matched) = derive_code(&r.name, r.kind);
            if !matched {
                tracing::warn!(name = %r.name, "No code-derivation pattern matched");
                unmatched.push(r.name.clone());
            }
            r.name_in_camel = camelize(&r.name);
            r.code_in_camel = camelize(&code);
            r.code = code;
            r
        })
        .collect();
    AliasExtraction { refs, unmatched }
}
