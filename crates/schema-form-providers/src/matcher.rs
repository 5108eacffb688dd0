// crates/schema-form-providers/src/matcher.rs
// ============================================================================
// Module: JSON Schema Matcher
// Description: Variant matcher backed by JSON Schema validation.
// Purpose: Score form data against variant schemas with partial-object leniency.
// Dependencies: jsonschema, schema-form-core, serde_json
// ============================================================================

//! ## Overview
//! Plain validation is a poor variant matcher for objects: an object with no
//! keys in common with a variant still validates against it, and a
//! half-filled object fails `required`. For variants declaring `properties`
//! the matcher therefore drops `required` and adds an `anyOf` demanding at
//! least one declared key, so an object matches a variant only when it
//! carries some of that variant's fields and none of them conflict.
//!
//! Compiled validators are cached per matching document, so re-matching the
//! same options on every data change compiles each of them once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

use jsonschema::Draft;
use jsonschema::Validator;
use schema_form_core::CollaboratorError;
use schema_form_core::Definitions;
use schema_form_core::Schema;
use schema_form_core::SchemaMatcher;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Compiled validators retained before the cache is cleared.
pub const MAX_CACHED_VALIDATORS: usize = 256;

/// Root keywords the definitions registry is attached under.
const REGISTRY_SLOTS: [&str; 2] = ["definitions", "$defs"];

// ============================================================================
// SECTION: Matcher
// ============================================================================

/// Matcher compiling each variant with the `jsonschema` crate.
pub struct JsonSchemaMatcher {
    /// JSON Schema draft used for compilation.
    draft: Draft,
    /// Compiled validators keyed by serialized matching document.
    validators: Mutex<BTreeMap<String, Arc<Validator>>>,
}

impl Clone for JsonSchemaMatcher {
    fn clone(&self) -> Self {
        Self::new(self.draft)
    }
}

impl fmt::Debug for JsonSchemaMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaMatcher")
            .field("draft", &self.draft)
            .field("cached_validators", &self.cached_validators())
            .finish()
    }
}

impl Default for JsonSchemaMatcher {
    fn default() -> Self {
        Self::new(Draft::Draft7)
    }
}

impl JsonSchemaMatcher {
    /// Creates a matcher for the given draft.
    #[must_use]
    pub const fn new(draft: Draft) -> Self {
        Self {
            draft,
            validators: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the number of compiled validators currently cached.
    #[must_use]
    pub fn cached_validators(&self) -> usize {
        self.validators.lock().map_or(0, |cache| cache.len())
    }

    /// Returns the validator for `document`, compiling it on a cache miss.
    fn validator_for(&self, document: &Value) -> Result<Arc<Validator>, CollaboratorError> {
        let key = document.to_string();
        if let Ok(cache) = self.validators.lock()
            && let Some(existing) = cache.get(&key)
        {
            return Ok(Arc::clone(existing));
        }
        let compiled = jsonschema::options()
            .with_draft(self.draft)
            .build(document)
            .map_err(|err| CollaboratorError::Matcher(format!("invalid schema: {err}")))?;
        let compiled = Arc::new(compiled);
        if let Ok(mut cache) = self.validators.lock() {
            if cache.len() >= MAX_CACHED_VALIDATORS {
                cache.clear();
            }
            cache.insert(key, Arc::clone(&compiled));
        }
        Ok(compiled)
    }
}

impl SchemaMatcher for JsonSchemaMatcher {
    fn matches(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<bool, CollaboratorError> {
        let Some(value) = value else {
            return Ok(false);
        };
        let document = matching_document(schema, definitions)?;
        let validator = self.validator_for(&document)?;
        Ok(validator.is_valid(value))
    }
}

// ============================================================================
// SECTION: Schema Augmentation
// ============================================================================

/// Returns the schema with object leniency applied, as a standalone document.
///
/// The definitions registry is attached under both `definitions` and `$defs`
/// so local `$ref` pointers of either style resolve; definitions the schema
/// carries itself take precedence.
fn matching_document(schema: &Schema, definitions: &Definitions) -> Result<Value, CollaboratorError> {
    let augmented = augment_for_matching(schema);
    let mut document = augmented
        .to_value()
        .map_err(|err| CollaboratorError::Matcher(format!("schema serialization failed: {err}")))?;
    if definitions.is_empty() {
        return Ok(document);
    }
    let registry = definitions
        .to_value()
        .map_err(|err| CollaboratorError::Matcher(format!("definitions serialization failed: {err}")))?;
    if let (Value::Object(root), Value::Object(registry)) = (&mut document, registry) {
        for keyword in REGISTRY_SLOTS {
            let slot = root.entry(keyword).or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(existing) = slot {
                for (name, definition) in &registry {
                    existing.entry(name.clone()).or_insert_with(|| definition.clone());
                }
            }
        }
    }
    Ok(document)
}

/// Applies object leniency to a variant schema that declares properties.
fn augment_for_matching(schema: &Schema) -> Schema {
    let Some(properties) = &schema.properties else {
        return schema.clone();
    };
    let mut augmented = schema.clone();
    augmented.required.clear();
    if properties.is_empty() {
        return augmented;
    }
    let requires_any: Vec<Schema> = properties
        .keys()
        .map(|key| Schema {
            required: vec![key.clone()],
            ..Schema::default()
        })
        .collect();
    if augmented.any_of.is_some() {
        augmented.all_of.get_or_insert_with(Vec::new).push(Schema {
            any_of: Some(requires_any),
            ..Schema::default()
        });
    } else {
        augmented.any_of = Some(requires_any);
    }
    augmented
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Tests use unwrap on deterministic fixtures."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn augmentation_drops_required_and_requires_a_declared_key() {
        let schema = Schema::from_value(json!({
            "properties": { "a": {}, "b": {} },
            "required": ["a", "b"]
        }))
        .unwrap();
        let augmented = augment_for_matching(&schema);
        assert!(augmented.required.is_empty());
        assert_eq!(augmented.any_of.as_ref().map(Vec::len), Some(2));
        assert!(augmented.all_of.is_none());
    }

    #[test]
    fn augmentation_wraps_existing_any_of_in_all_of() {
        let schema = Schema::from_value(json!({
            "properties": { "a": {} },
            "anyOf": [{ "required": ["a"] }, { "required": ["z"] }]
        }))
        .unwrap();
        let augmented = augment_for_matching(&schema);
        assert_eq!(augmented.any_of.as_ref().map(Vec::len), Some(2));
        let all_of = augmented.all_of.expect("allOf added");
        assert_eq!(all_of.len(), 1);
        assert_eq!(all_of[0].any_of.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn schema_definitions_win_over_registry() {
        let schema = Schema::from_value(json!({
            "$ref": "#/definitions/Name",
            "definitions": { "Name": { "type": "string" } }
        }))
        .unwrap();
        let mut registry = Definitions::new();
        registry.insert("Name", Schema::from_value(json!({ "type": "number" })).unwrap());
        registry.insert("Other", Schema::from_value(json!({ "type": "boolean" })).unwrap());
        let document = matching_document(&schema, &registry).unwrap();
        assert_eq!(document["definitions"]["Name"]["type"], json!("string"));
        assert_eq!(document["definitions"]["Other"]["type"], json!("boolean"));
        assert_eq!(document["$defs"]["Name"]["type"], json!("number"));
    }

    #[test]
    fn own_defs_win_over_registry() {
        let schema = Schema::from_value(json!({
            "$ref": "#/$defs/Name",
            "$defs": { "Name": { "type": "string" } }
        }))
        .unwrap();
        let mut registry = Definitions::new();
        registry.insert("Name", Schema::from_value(json!({ "type": "number" })).unwrap());
        let document = matching_document(&schema, &registry).unwrap();
        assert_eq!(document["$defs"]["Name"]["type"], json!("string"));
        assert_eq!(document["definitions"]["Name"]["type"], json!("number"));
    }
}
