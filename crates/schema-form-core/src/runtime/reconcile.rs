// crates/schema-form-core/src/runtime/reconcile.rs
// ============================================================================
// Module: Schema Form Data Reconciliation
// Description: Pure data surgery applied when the active variant changes.
// Purpose: Drop fields owned by abandoned variants without touching caller data.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! When a user switches variants, object data keeps the keys the new variant
//! declares and any keys no variant declares, and loses keys that only other
//! variants declare. Non-object data, or a non-object target, resets to
//! absent. The result is a fresh value; the input is never modified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::Schema;
use crate::core::exclude_keys;

// ============================================================================
// SECTION: Reconciliation
// ============================================================================

/// Computes the base value carried into a newly selected variant.
///
/// `target` is the index of the new variant in `options` and `resolved` is its
/// dereferenced schema. Returns `None` when the data must reset.
#[must_use]
pub fn reconciled_base(
    current: Option<&Value>,
    options: &[Schema],
    target: usize,
    resolved: &Schema,
) -> Option<Value> {
    let Some(Value::Object(object)) = current else {
        return None;
    };
    if !resolved.is_object_shaped() {
        return None;
    }
    Some(Value::Object(discard_foreign_keys(object, options, target, resolved)))
}

/// Returns `object` without keys declared only by variants other than `target`.
///
/// A key survives when the target declares it, either in its raw option or in
/// its resolved schema, or when no other variant declares it.
#[must_use]
pub fn discard_foreign_keys(
    object: &Map<String, Value>,
    options: &[Schema],
    target: usize,
    resolved: &Schema,
) -> Map<String, Value> {
    let target_option = options.get(target);
    let declared_by_target = |key: &str| {
        resolved.declares(key) || target_option.is_some_and(|option| option.declares(key))
    };
    let declared_by_other = |key: &str| {
        options
            .iter()
            .enumerate()
            .any(|(index, option)| index != target && option.declares(key))
    };
    exclude_keys(object, |key| declared_by_other(key) && !declared_by_target(key))
}
