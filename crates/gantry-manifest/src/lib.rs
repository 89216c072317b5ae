//! Component manifests, composite schemas and configuration validation.
//!
//! Each component may declare a manifest (migration rules, a JSON Schema for
//! its configuration slice, an optional custom constraint check). This crate
//! loads the manifests, combines them into one composite schema tree keyed by
//! canonical component code, validates the merged sandbox configuration
//! against it, and invokes each component's constraint check with a
//! dependency-scoped view of the configuration.
//!
//! Nothing here throws on a validation failure: every check appends a
//! [`ValidationResult`](gantry_issue::ValidationResult) and the issue
//! inspector's barrier decides the outcome.

pub mod constraint;
pub mod handler;
pub mod manifest;
pub mod schema;
pub mod validate;

pub use constraint::{ConstraintFn, ConstraintRegistry};
pub use handler::ManifestHandler;
pub use manifest::{Manifest, ManifestValidation};
pub use schema::{
    BridgeSchemaEntry, BundleSchema, CrateSchema, SandboxSchema, combine_bridge_schema,
    combine_bundle_schema,
};
pub use validate::{check_sandbox_constraints, validate_bridge_config, validate_bundle_config};
