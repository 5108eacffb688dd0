// crates/schema-form-core/tests/proptest_resolver.rs
// ============================================================================
// Module: Variant Resolver Property-Based Tests
// Description: Property tests for selection stability and reconciliation.
// Purpose: Detect invariant violations across wide data and option ranges.
// ============================================================================

//! Property-based tests for variant resolver invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod support;

use proptest::prelude::*;
use schema_form_core::Definitions;
use schema_form_core::FieldPath;
use schema_form_core::Schema;
use schema_form_core::SelectionState;
use schema_form_core::discard_foreign_keys;
use serde_json::Value;
use serde_json::json;

use crate::support::schema;
use crate::support::stub_resolver;

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        "[a-z]{0,6}".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map("[a-f]{1,2}", inner, 0 .. 5).prop_map(|map| {
                Value::Object(map.into_iter().collect())
            }),
        ]
    })
}

/// Object options over small overlapping key sets, plus scalar options.
fn options_strategy() -> impl Strategy<Value = Vec<Schema>> {
    let option = prop_oneof![
        prop::collection::btree_set("[a-f]{1,2}", 1 .. 4).prop_map(|keys| {
            let properties: serde_json::Map<String, Value> =
                keys.into_iter().map(|key| (key, json!({}))).collect();
            schema(json!({ "type": "object", "properties": properties }))
        }),
        Just(schema(json!({ "type": "string" }))),
        Just(schema(json!({ "type": "integer" }))),
        Just(schema(json!({ "type": "boolean" }))),
    ];
    prop::collection::vec(option, 1 .. 5)
}

proptest! {
    #[test]
    fn matching_is_deterministic(options in options_strategy(), data in json_value_strategy(3)) {
        let resolver = stub_resolver();
        let definitions = Definitions::new();
        let first = resolver.resolve_match(Some(&data), &options, &definitions).unwrap();
        let second = resolver.resolve_match(Some(&data), &options, &definitions).unwrap();
        prop_assert_eq!(first, second);
        if let Some(index) = first {
            prop_assert!(index < options.len());
        }
    }

    #[test]
    fn selection_stays_in_range(
        options in options_strategy(),
        start in 0_usize .. 8,
        data in json_value_strategy(3),
    ) {
        let resolver = stub_resolver();
        let mut state = SelectionState::new(start);
        let transition = resolver
            .on_upstream_change(&FieldPath::root(), &mut state, Some(&data), &options, &Definitions::new())
            .unwrap();
        prop_assert!(state.active_index() < options.len());
        prop_assert_eq!(transition.active_index(), state.active_index());
    }

    #[test]
    fn unmatched_data_is_sticky(options in options_strategy(), start in 0_usize .. 4) {
        prop_assume!(start < options.len());
        let resolver = stub_resolver();
        let mut state = SelectionState::new(start);
        let data = json!([["nothing matches arrays"]]);
        resolver
            .on_upstream_change(&FieldPath::root(), &mut state, Some(&data), &options, &Definitions::new())
            .unwrap();
        prop_assert_eq!(state.active_index(), start);
    }

    #[test]
    fn reconcile_never_drops_undeclared_keys(
        options in options_strategy(),
        target in 0_usize .. 4,
        data in prop::collection::btree_map("[a-z]{1,2}", json_value_strategy(1), 0 .. 8),
    ) {
        prop_assume!(target < options.len());
        let object: serde_json::Map<String, Value> = data.into_iter().collect();
        let kept = discard_foreign_keys(&object, &options, target, &options[target]);
        for (key, value) in &object {
            let declared_elsewhere = options
                .iter()
                .enumerate()
                .any(|(index, option)| index != target && option.declares(key));
            if !declared_elsewhere || options[target].declares(key) {
                prop_assert_eq!(kept.get(key), Some(value));
            } else {
                prop_assert!(!kept.contains_key(key));
            }
        }
        prop_assert!(kept.keys().all(|key| object.contains_key(key)));
    }
}
