// crates/schema-form-providers/tests/defaults_unit.rs
// ============================================================================
// Module: Default Form State Unit Tests
// Description: Default computation and merging with partial data.
// Purpose: Ensure defaults fill gaps without overwriting user data.
// ============================================================================

//! Default computation and merge tests for the built-in filler.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use schema_form_core::CollaboratorError;
use schema_form_core::DefaultFiller;
use schema_form_core::Definitions;
use schema_form_core::Schema;
use schema_form_providers::DefaultFormState;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

fn schema(value: Value) -> Schema {
    Schema::from_value(value).unwrap()
}

fn fill(variant: Value, partial: Option<Value>) -> Option<Value> {
    DefaultFormState::default().fill_defaults(&schema(variant), partial, &Definitions::new()).unwrap()
}

fn profile() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "role": { "type": "string", "default": "viewer" },
            "prefs": {
                "type": "object",
                "properties": {
                    "theme": { "default": "dark" },
                    "size": { "default": 12 }
                }
            }
        }
    })
}

// ============================================================================
// SECTION: Computation
// ============================================================================

#[test]
fn object_defaults_recurse_into_properties() {
    let defaults = fill(profile(), None);
    assert_eq!(defaults, Some(json!({ "role": "viewer", "prefs": { "theme": "dark", "size": 12 } })));
}

#[test]
fn parent_default_is_overridden_by_child_default() {
    let variant = json!({
        "type": "object",
        "default": { "prefs": { "theme": "light", "font": "serif" } },
        "properties": {
            "prefs": {
                "type": "object",
                "default": { "theme": "dark" },
                "properties": { "theme": {}, "font": {} }
            }
        }
    });
    assert_eq!(fill(variant, None), Some(json!({ "prefs": { "theme": "dark", "font": "serif" } })));
}

#[test]
fn references_contribute_target_defaults() {
    let mut definitions = Definitions::new();
    definitions.insert("Currency", schema(json!({ "type": "string", "default": "EUR" })));
    let variant = schema(json!({
        "type": "object",
        "properties": { "currency": { "$ref": "#/definitions/Currency" } }
    }));
    let filled = DefaultFormState::default().fill_defaults(&variant, None, &definitions).unwrap();
    assert_eq!(filled, Some(json!({ "currency": "EUR" })));
}

#[test]
fn unresolved_reference_is_a_defaults_error() {
    let variant = schema(json!({ "$ref": "#/definitions/Missing" }));
    let result = DefaultFormState::default().fill_defaults(&variant, None, &Definitions::new());
    assert!(matches!(result, Err(CollaboratorError::Defaults(_))), "got {result:?}");
}

#[test]
fn untyped_alternatives_default_from_first_option() {
    let variant = json!({ "anyOf": [{ "default": "first" }, { "default": "second" }] });
    assert_eq!(fill(variant, None), Some(json!("first")));
}

#[test]
fn array_items_are_completed() {
    let variant = json!({
        "type": "array",
        "default": [{ "name": "a" }, { "name": "b", "qty": 3 }],
        "items": { "type": "object", "properties": { "name": {}, "qty": { "default": 1 } } }
    });
    assert_eq!(
        fill(variant, None),
        Some(json!([{ "name": "a", "qty": 1 }, { "name": "b", "qty": 3 }]))
    );
}

#[test]
fn recursive_schemas_terminate() {
    let mut definitions = Definitions::new();
    definitions.insert(
        "Node",
        schema(json!({
            "type": "object",
            "properties": {
                "label": { "default": "node" },
                "child": { "$ref": "#/definitions/Node" }
            }
        })),
    );
    let root = schema(json!({ "$ref": "#/definitions/Node" }));
    let filled = DefaultFormState::new(6).fill_defaults(&root, None, &definitions).unwrap();
    let filled = filled.expect("defaults computed");
    assert_eq!(filled["label"], json!("node"));
    assert_eq!(filled["child"]["label"], json!("node"));
}

// ============================================================================
// SECTION: Merging
// ============================================================================

#[test]
fn object_data_wins_over_defaults() {
    let filled = fill(profile(), Some(json!({ "role": "admin", "prefs": { "size": 16 }, "extra": 1 })));
    assert_eq!(
        filled,
        Some(json!({
            "role": "admin",
            "prefs": { "theme": "dark", "size": 16 },
            "extra": 1
        }))
    );
}

#[test]
fn scalar_data_is_kept_even_when_falsy() {
    let variant = json!({ "type": "number", "default": 7 });
    assert_eq!(fill(variant.clone(), Some(json!(0))), Some(json!(0)));
    assert_eq!(fill(variant.clone(), Some(json!(3))), Some(json!(3)));
    assert_eq!(fill(variant.clone(), Some(Value::Null)), Some(json!(7)));
    assert_eq!(fill(variant, None), Some(json!(7)));
}

#[test]
fn no_defaults_leave_absent_data_absent() {
    assert_eq!(fill(json!({ "type": "string" }), None), None);
}
