// crates/schema-form-providers/src/defaults.rs
// ============================================================================
// Module: Default Form State
// Description: Schema default computation merged with partial form data.
// Purpose: Fill a freshly selected variant with the defaults it declares.
// Dependencies: schema-form-core, serde_json
// ============================================================================

//! ## Overview
//! Defaults are computed top-down. A node's own `default` wins over the
//! default its parent supplied for it (objects are deep-merged); a `$ref`
//! node inherits the defaults of its target; object nodes recurse into
//! their `properties`; array nodes with an `items` schema recurse into each
//! defaulted element; untyped alternatives fall back to their first option.
//!
//! The computed defaults are then merged with the partial data: absent or
//! `null` data takes the defaults, object data is deep-merged with the data
//! winning, and any other data is kept as is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use schema_form_core::CollaboratorError;
use schema_form_core::DefaultFiller;
use schema_form_core::Definitions;
use schema_form_core::Schema;
use schema_form_core::SchemaType;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bound on nested schema levels visited while computing defaults.
pub const DEFAULT_MAX_DEFAULTS_DEPTH: usize = 32;

// ============================================================================
// SECTION: Default Filler
// ============================================================================

/// Default filler computing schema defaults.
///
/// Recursive schemas stop contributing defaults once
/// [`DefaultFormState::max_depth`] nested levels have been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFormState {
    /// Maximum nesting depth explored.
    max_depth: usize,
}

impl Default for DefaultFormState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEFAULTS_DEPTH)
    }
}

impl DefaultFormState {
    /// Creates a filler exploring at most `max_depth` nested levels.
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
        }
    }

    /// Returns the nesting bound.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Computes the defaults declared by `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Defaults`] when a `$ref` cannot be
    /// resolved or a nested schema is malformed.
    pub fn compute_defaults(
        &self,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<Option<Value>, CollaboratorError> {
        self.compute(schema, schema.default.clone(), definitions, 0)
    }

    /// Computes defaults for one node given the default inherited from its parent.
    fn compute(
        &self,
        schema: &Schema,
        inherited: Option<Value>,
        definitions: &Definitions,
        depth: usize,
    ) -> Result<Option<Value>, CollaboratorError> {
        if depth > self.max_depth {
            return Ok(inherited);
        }
        let mut defaults = match (inherited, &schema.default) {
            (Some(Value::Object(parent)), Some(Value::Object(own))) => {
                Some(Value::Object(merge_objects(parent, own.clone())))
            }
            (_, Some(own)) => Some(own.clone()),
            (inherited, None) => {
                if let Some(reference) = &schema.reference {
                    let target = definitions.lookup(reference).ok_or_else(|| {
                        CollaboratorError::Defaults(format!("unresolved reference: {reference}"))
                    })?;
                    return self.compute(target, inherited, definitions, depth + 1);
                }
                inherited
            }
        };
        if defaults.is_none()
            && schema.schema_type.is_none()
            && let Some(first) = schema.any_of.iter().chain(schema.one_of.iter()).flatten().next()
        {
            defaults = self.compute(first, None, definitions, depth + 1)?;
        }
        if is_object_schema(schema) {
            return self.compute_object(schema, defaults, definitions, depth).map(Some);
        }
        if let (Some(Value::Array(items)), Some(item_schema)) = (&defaults, schema.keyword("items"))
            && item_schema.is_object()
        {
            let item_schema = Schema::from_value(item_schema.clone())
                .map_err(|err| CollaboratorError::Defaults(format!("items schema invalid: {err}")))?;
            let mut filled = Vec::with_capacity(items.len());
            for item in items {
                let item = self.compute(&item_schema, Some(item.clone()), definitions, depth + 1)?;
                filled.push(item.unwrap_or(Value::Null));
            }
            return Ok(Some(Value::Array(filled)));
        }
        Ok(defaults)
    }

    /// Computes one default per declared property.
    fn compute_object(
        &self,
        schema: &Schema,
        defaults: Option<Value>,
        definitions: &Definitions,
        depth: usize,
    ) -> Result<Value, CollaboratorError> {
        let mut inherited = match defaults {
            Some(Value::Object(object)) => object,
            _ => Map::new(),
        };
        let mut computed = Map::new();
        if let Some(properties) = &schema.properties {
            for (key, property) in properties {
                let parent = inherited.remove(key);
                if let Some(value) = self.compute(property, parent, definitions, depth + 1)? {
                    computed.insert(key.clone(), value);
                }
            }
        }
        Ok(Value::Object(computed))
    }
}

impl DefaultFiller for DefaultFormState {
    fn fill_defaults(
        &self,
        schema: &Schema,
        partial: Option<Value>,
        definitions: &Definitions,
    ) -> Result<Option<Value>, CollaboratorError> {
        let defaults = self.compute_defaults(schema, definitions)?;
        Ok(match (partial, defaults) {
            (None | Some(Value::Null), defaults) => defaults,
            (Some(Value::Object(data)), Some(Value::Object(defaults))) => {
                Some(Value::Object(merge_objects(defaults, data)))
            }
            (Some(data), _) => Some(data),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when defaults for `schema` are computed property by property.
fn is_object_schema(schema: &Schema) -> bool {
    match &schema.schema_type {
        Some(declared) => declared.includes(SchemaType::Object),
        None => schema.properties.is_some(),
    }
}

/// Deep-merges `overlay` into `base`; overlay entries win except where both sides are objects.
fn merge_objects(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(Value::Object(left)), Value::Object(right)) => Value::Object(merge_objects(left, right)),
            (_, value) => value,
        };
        base.insert(key, merged);
    }
    base
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        reason = "Tests use panic-based assertions on deterministic fixtures."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn merge_objects_prefers_overlay_and_recurses() {
        let base = json!({ "a": 1, "nested": { "x": 1, "y": 1 } });
        let overlay = json!({ "a": 2, "nested": { "y": 2 }, "b": [1] });
        let (Value::Object(base), Value::Object(overlay)) = (base, overlay) else {
            panic!("fixtures are objects");
        };
        let merged = Value::Object(merge_objects(base, overlay));
        assert_eq!(merged, json!({ "a": 2, "b": [1], "nested": { "x": 1, "y": 2 } }));
    }

    #[test]
    fn untyped_schema_with_properties_is_object_shaped() {
        let schema = Schema::from_value(json!({ "properties": {} })).unwrap();
        assert!(is_object_schema(&schema));
        let schema = Schema::from_value(json!({ "type": "string" })).unwrap();
        assert!(!is_object_schema(&schema));
    }
}
