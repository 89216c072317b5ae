//! Component references, code derivation and alias maps.
//!
//! Every component (the application, the framework, plugins, bridges) can be
//! addressed by its full package name, a camelCase variant, a short code, or
//! any former name it was renamed from. This crate canonicalizes those naming
//! conventions: [`extract_alias_names`] derives the short codes, and
//! [`NameResolver`] holds the bidirectional alias tables built from them.

pub mod alias;
pub mod camel;
pub mod component;
pub mod error;
pub mod extract;

pub use alias::{
    AliasScope, NameResolver, NamingConflict, build_absolute_alias_map, build_relative_alias_map,
};
pub use camel::camelize;
pub use component::{ComponentKind, ComponentRef, Presets};
pub use error::{Error, Result};
pub use extract::{AliasExtraction, derive_code, extract_alias_names};
