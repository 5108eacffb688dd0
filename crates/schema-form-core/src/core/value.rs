// crates/schema-form-core/src/core/value.rs
// ============================================================================
// Module: Schema Form Value Helpers
// Description: Classification and pure transformations over form data values.
// Purpose: Keep form data handling free of in-place mutation of caller data.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Form data is an optional JSON value: `None` means the field has no data
//! yet. These helpers classify values the way the form engine guesses types
//! and build new objects with keys excluded, leaving the input untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Value Classification
// ============================================================================

/// Runtime kind of a form data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// No value present.
    Absent,
    /// Explicit JSON null.
    Null,
    /// Boolean.
    Boolean,
    /// Number.
    Number,
    /// String.
    String,
    /// Array.
    Array,
    /// Object.
    Object,
}

/// Classifies an optional form data value.
#[must_use]
pub const fn guess_type(value: Option<&Value>) -> ValueKind {
    match value {
        None => ValueKind::Absent,
        Some(Value::Null) => ValueKind::Null,
        Some(Value::Bool(_)) => ValueKind::Boolean,
        Some(Value::Number(_)) => ValueKind::Number,
        Some(Value::String(_)) => ValueKind::String,
        Some(Value::Array(_)) => ValueKind::Array,
        Some(Value::Object(_)) => ValueKind::Object,
    }
}

/// Returns true when a schema keyword value is truthy.
///
/// `null`, `false`, zero and the empty string are falsy; arrays and objects
/// are always truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// SECTION: Key Exclusion
// ============================================================================

/// Returns a copy of `object` without the entries for which `exclude` returns true.
#[must_use]
pub fn exclude_keys<F>(object: &Map<String, Value>, mut exclude: F) -> Map<String, Value>
where
    F: FnMut(&str) -> bool,
{
    object
        .iter()
        .filter(|(key, _)| !exclude(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
