// crates/schema-form-core/src/runtime/checkbox.rs
// ============================================================================
// Module: Schema Form Checkbox State
// Description: Render-time state for boolean checkbox widgets.
// Purpose: Derive required/checked/disabled flags from schema and props.
// Dependencies: crate::{core, runtime::requiredness}, serde, serde_json
// ============================================================================

//! ## Overview
//! A checkbox is only marked `required` when its schema forces `true`; an
//! unchecked box would otherwise always fail native validation. Visual
//! rendering stays with the host widget catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::Schema;
use crate::runtime::requiredness::RequirednessConfig;
use crate::runtime::requiredness::evaluate_requiredness;

// ============================================================================
// SECTION: Checkbox State
// ============================================================================

/// Interaction flags supplied by the form engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxFlags {
    /// Field is disabled.
    pub disabled: bool,
    /// Field is read-only.
    pub readonly: bool,
}

/// Derived checkbox widget state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxState {
    /// Input carries the `required` attribute.
    pub required: bool,
    /// Input is checked.
    pub checked: bool,
    /// Input is disabled (disabled or read-only).
    pub disabled: bool,
    /// Label is shown (schema does not set `hideLabel`).
    pub show_label: bool,
    /// Schema description shown above the input.
    pub description: Option<String>,
}

impl CheckboxState {
    /// Derives checkbox state from its schema, current value, and flags.
    #[must_use]
    pub fn from_schema(
        schema: &Schema,
        value: Option<&Value>,
        flags: CheckboxFlags,
        config: &RequirednessConfig,
    ) -> Self {
        let hide_label = schema.keyword("hideLabel").and_then(Value::as_bool).unwrap_or(false);
        Self {
            required: evaluate_requiredness(schema, config).is_required(),
            checked: value.and_then(Value::as_bool).unwrap_or(false),
            disabled: flags.disabled || flags.readonly,
            show_label: !hide_label,
            description: schema.description.clone(),
        }
    }
}
