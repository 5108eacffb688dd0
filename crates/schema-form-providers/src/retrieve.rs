// crates/schema-form-providers/src/retrieve.rs
// ============================================================================
// Module: Definition Resolver
// Description: `$ref` dereferencing and data-driven dependency expansion.
// Purpose: Turn a variant schema into the concrete schema its data is edited with.
// Dependencies: schema-form-core, serde_json
// ============================================================================

//! ## Overview
//! [`DefinitionResolver`] follows local `$ref` pointers through the
//! definitions registry, merging keywords declared next to a `$ref` over the
//! referenced schema. When a data hint is supplied, property `dependencies`
//! triggered by keys present in the hint are folded in: array dependencies
//! extend `required`, schema dependencies merge their `properties` and
//! `required`.
//!
//! Security posture: schemas are untrusted input; reference chains are
//! bounded by [`DefinitionResolver::max_depth`] and cycles fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use schema_form_core::CollaboratorError;
use schema_form_core::Definitions;
use schema_form_core::Schema;
use schema_form_core::SchemaResolver;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bound on chained `$ref` hops.
pub const DEFAULT_MAX_REF_DEPTH: usize = 32;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Dereferences schemas against a definitions registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionResolver {
    /// Maximum number of `$ref` hops followed for one schema.
    max_depth: usize,
}

impl Default for DefinitionResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REF_DEPTH)
    }
}

impl DefinitionResolver {
    /// Creates a resolver following at most `max_depth` `$ref` hops.
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
        }
    }

    /// Returns the `$ref` hop bound.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Follows `$ref` pointers until the schema has none left.
    fn dereference(&self, schema: &Schema, definitions: &Definitions) -> Result<Schema, CollaboratorError> {
        let mut current = schema.clone();
        let mut visited = BTreeSet::new();
        while let Some(reference) = current.reference.take() {
            if !visited.insert(reference.clone()) {
                return Err(CollaboratorError::Resolver(format!("reference cycle at {reference}")));
            }
            if visited.len() > self.max_depth {
                return Err(CollaboratorError::Resolver(format!(
                    "reference chain exceeds {} hops",
                    self.max_depth
                )));
            }
            let target = definitions
                .lookup(&reference)
                .ok_or_else(|| CollaboratorError::Resolver(format!("unresolved reference: {reference}")))?;
            current = merge_siblings(target, &current)?;
        }
        Ok(current)
    }
}

impl SchemaResolver for DefinitionResolver {
    fn resolve(
        &self,
        schema: &Schema,
        definitions: &Definitions,
        hint: Option<&Value>,
    ) -> Result<Schema, CollaboratorError> {
        let resolved = self.dereference(schema, definitions)?;
        match hint {
            Some(Value::Object(data)) => apply_dependencies(resolved, data, definitions, self),
            _ => Ok(resolved),
        }
    }
}

// ============================================================================
// SECTION: Merging
// ============================================================================

/// Returns `base` with every keyword of `local` laid over it.
fn merge_siblings(base: &Schema, local: &Schema) -> Result<Schema, CollaboratorError> {
    let Value::Object(mut merged) = to_value(base)? else {
        return Ok(local.clone());
    };
    if let Value::Object(overrides) = to_value(local)? {
        merged.extend(overrides);
    }
    Schema::from_value(Value::Object(merged))
        .map_err(|err| CollaboratorError::Resolver(format!("merged schema invalid: {err}")))
}

/// Serializes a schema, mapping failures to resolver errors.
fn to_value(schema: &Schema) -> Result<Value, CollaboratorError> {
    schema
        .to_value()
        .map_err(|err| CollaboratorError::Resolver(format!("schema serialization failed: {err}")))
}

// ============================================================================
// SECTION: Dependencies
// ============================================================================

/// Folds in property dependencies triggered by keys present in `data`.
fn apply_dependencies(
    mut schema: Schema,
    data: &Map<String, Value>,
    definitions: &Definitions,
    resolver: &DefinitionResolver,
) -> Result<Schema, CollaboratorError> {
    let Some(Value::Object(dependencies)) = schema.extra.remove("dependencies") else {
        return Ok(schema);
    };
    for (key, dependency) in dependencies {
        if !data.contains_key(&key) {
            continue;
        }
        match dependency {
            Value::Array(names) => {
                for name in names.iter().filter_map(Value::as_str) {
                    push_required(&mut schema, name);
                }
            }
            Value::Object(_) => {
                let dependent = Schema::from_value(dependency).map_err(|err| {
                    CollaboratorError::Resolver(format!("dependency {key} invalid: {err}"))
                })?;
                let dependent = resolver.dereference(&dependent, definitions)?;
                if let Some(properties) = dependent.properties {
                    let target = schema.properties.get_or_insert_with(Default::default);
                    for (name, property) in properties {
                        target.insert(name, property);
                    }
                }
                for name in &dependent.required {
                    push_required(&mut schema, name);
                }
            }
            _ => {}
        }
    }
    Ok(schema)
}

/// Adds `name` to `required` unless already present.
fn push_required(schema: &mut Schema, name: &str) {
    if !schema.required.iter().any(|existing| existing == name) {
        schema.required.push(name.to_string());
    }
}
