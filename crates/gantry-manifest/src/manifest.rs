//! Component manifest loading and shape checking.
//!
//! A manifest file lives at `<component>/manifest.<ext>`:
//!
//! ```toml
//! [config.migration]
//!
//! [config.validation.schema]
//! type = "object"
//! required = ["host", "port"]
//! ```
//!
//! An absent manifest is not an error; the component simply has none. A
//! present manifest whose shape violates the meta-schema is non-fatal: the
//! best-effort parsed manifest is still returned and one `manifest`-stage
//! record is collected.

use crate::constraint::{ConstraintFn, ConstraintRegistry};
use crate::validate::schema_failures;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Validation section of a loaded manifest.
#[derive(Clone, Default)]
pub struct ManifestValidation {
    /// Declared JSON Schema for the component's sandbox slice. Kept verbatim,
    /// even when the meta-schema flagged it; only object schemas are used for
    /// validation later.
    pub schema: Value,
    /// Custom constraint check attached from the [`ConstraintRegistry`].
    pub check_constraints: Option<ConstraintFn>,
}

impl std::fmt::Debug for ManifestValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestValidation")
            .field("schema", &self.schema)
            .field(
                "check_constraints",
                &self.check_constraints.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

/// A component's loaded manifest.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Migration rules (version transforms), retained as data for consumers.
    pub migration: Value,
    /// Validation section.
    pub validation: ManifestValidation,
}

impl Manifest {
    /// Best-effort extraction from a raw manifest document.
    ///
    /// Missing sections default to empty; nothing is rejected here. Shape
    /// problems are the meta-schema's business.
    pub fn from_raw(raw: &Value, check_constraints: Option<ConstraintFn>) -> Self {
        let config = &raw["config"];
        Self {
            migration: config
                .get("migration")
                .cloned()
                .unwrap_or_else(|| json!({})),
            validation: ManifestValidation {
                schema: config
                    .get("validation")
                    .and_then(|v| v.get("schema"))
                    .cloned()
                    .unwrap_or(Value::Null),
                check_constraints,
            },
        }
    }

    /// Whether the declared schema is usable for validation.
    pub fn has_object_schema(&self) -> bool {
        self.validation.schema.is_object()
    }
}

/// The fixed meta-schema every manifest document is checked against.
pub fn meta_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "type": "object",
            "properties": {
                "config": {
                    "type": "object",
                    "properties": {
                        "migration": { "type": "object" },
                        "validation": {
                            "type": "object",
                            "properties": {
                                "schema": { "type": "object" }
                            }
                        }
                    }
                }
            }
        })
    })
}

/// Check a raw manifest document against the meta-schema.
///
/// Returns the list of violations, empty when the shape is valid.
pub fn check_manifest_shape(raw: &Value) -> Vec<String> {
    schema_failures(meta_schema(), raw)
}

/// Attach the registered constraint for a component, if any.
pub fn constraint_for(registry: &ConstraintRegistry, component_name: &str) -> Option<ConstraintFn> {
    registry.get(component_name).cloned()
}
