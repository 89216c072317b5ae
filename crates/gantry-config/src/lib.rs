//! Layered configuration loading and merging.
//!
//! The [`ConfigLoader`] reads every configuration fragment contributed by the
//! framework core, by each loaded component and by the hosting application,
//! merges them across overlay layers whose application order is
//! caller-controlled, and canonicalizes cross-component bridge references
//! through the alias tables of `gantry-naming`.
//!
//! Two merge disciplines coexist: the `default` side of each layer is a
//! first-write-wins deep fill, the `mixture` side a last-write-wins deep
//! override. Both are exported as pure functions from [`merge`] so they can
//! be exercised directly.

pub mod env;
pub mod error;
pub mod layer;
pub mod loader;
pub mod merge;
pub mod transform;

pub use env::EnvOptions;
pub use error::{Error, Result};
pub use layer::{ConfigLayer, ConfigTree, ConfigType};
pub use loader::ConfigLoader;
pub use merge::{deep_fill, deep_override};
pub use transform::{alias_rendered_view, canonicalize_bridges, transform_config};
