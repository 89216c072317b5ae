//! The two merge disciplines of the configuration engine.
//!
//! Both operate on `serde_json::Value` trees and are pure: all inputs are
//! explicit arguments, so tests call them directly.

use serde_json::Value;

/// First-write-wins, deep-fill merge.
///
/// Once a key path has a value in `base`, `addition` cannot override it, but
/// sub-keys still missing from `base` are filled in recursively. Feeding
/// sources in precedence order (highest first) therefore yields a tree where
/// the earliest source wins every contested key.
pub fn deep_fill(base: &mut Value, addition: &Value) {
    match (base, addition) {
        (Value::Object(base_map), Value::Object(addition_map)) => {
            for (key, addition_val) in addition_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_fill(base_val, addition_val);
                } else {
                    base_map.insert(key.clone(), addition_val.clone());
                }
            }
        }
        // A written value, object or not, is never replaced.
        (_base, _addition) => {}
    }
}

/// Last-write-wins, deep-override merge.
///
/// If both values are objects they merge recursively with `overlay` taking
/// precedence; otherwise `overlay` replaces `base`. Feeding sources in
/// sequence therefore yields a tree where the latest source wins every
/// contested key.
pub fn deep_override(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_override(base_val, overlay_val);
                } else {
                    base_map.insert(key.clone(), overlay_val.clone());
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}
