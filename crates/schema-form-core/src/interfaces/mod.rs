// crates/schema-form-core/src/interfaces/mod.rs
// ============================================================================
// Module: Schema Form Interfaces
// Description: Collaborator contracts consumed by the variant resolver.
// Purpose: Define matching, dereferencing, defaulting, dispatch, and change surfaces.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The resolver never decides on its own whether data fits a schema, how a
//! `$ref` expands, or what a default looks like. Those decisions belong to
//! the host form engine and enter through these traits. Implementations must
//! be synchronous and must not mutate their inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::Definitions;
use crate::core::FieldPath;
use crate::core::Schema;

// ============================================================================
// SECTION: Collaborator Errors
// ============================================================================

/// Errors signaled by collaborator implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The matcher could not score a value against a schema.
    #[error("schema matcher error: {0}")]
    Matcher(String),
    /// The resolver could not dereference a schema.
    #[error("schema resolver error: {0}")]
    Resolver(String),
    /// The default filler could not compute defaults.
    #[error("default filler error: {0}")]
    Defaults(String),
}

// ============================================================================
// SECTION: Schema Matcher
// ============================================================================

/// Structural compatibility test between form data and a schema.
pub trait SchemaMatcher {
    /// Returns true when `value` satisfies `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when the schema cannot be evaluated.
    fn matches(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<bool, CollaboratorError>;
}

// ============================================================================
// SECTION: Schema Resolver
// ============================================================================

/// Schema dereferencer producing a concrete schema.
pub trait SchemaResolver {
    /// Resolves references in `schema`, optionally guided by a data hint.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when a reference cannot be resolved.
    fn resolve(
        &self,
        schema: &Schema,
        definitions: &Definitions,
        hint: Option<&Value>,
    ) -> Result<Schema, CollaboratorError>;
}

// ============================================================================
// SECTION: Default Filler
// ============================================================================

/// Populates schema-mandated defaults on top of partial form data.
pub trait DefaultFiller {
    /// Returns `partial` with defaults from `schema` applied.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when defaults cannot be computed.
    fn fill_defaults(
        &self,
        schema: &Schema,
        partial: Option<Value>,
        definitions: &Definitions,
    ) -> Result<Option<Value>, CollaboratorError>;
}

// ============================================================================
// SECTION: Field Dispatcher
// ============================================================================

/// Generic field renderer the variant field delegates its body to.
pub trait FieldDispatcher {
    /// Rendered node produced for a field.
    type Node;

    /// Renders the field described by `schema` at `path`.
    fn dispatch(&self, schema: &Schema, form_data: Option<&Value>, path: &FieldPath) -> Self::Node;
}

// ============================================================================
// SECTION: Change Sink
// ============================================================================

/// Receiver for form data emitted by a field.
pub trait ChangeSink {
    /// Accepts the field's new form data.
    fn emit(&mut self, form_data: Option<Value>);
}

impl<F> ChangeSink for F
where
    F: FnMut(Option<Value>),
{
    fn emit(&mut self, form_data: Option<Value>) {
        self(form_data);
    }
}

// ============================================================================
// SECTION: Reference Implementations
// ============================================================================

impl<T: SchemaMatcher + ?Sized> SchemaMatcher for &T {
    fn matches(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<bool, CollaboratorError> {
        (**self).matches(value, schema, definitions)
    }
}

impl<T: SchemaResolver + ?Sized> SchemaResolver for &T {
    fn resolve(
        &self,
        schema: &Schema,
        definitions: &Definitions,
        hint: Option<&Value>,
    ) -> Result<Schema, CollaboratorError> {
        (**self).resolve(schema, definitions, hint)
    }
}

impl<T: DefaultFiller + ?Sized> DefaultFiller for &T {
    fn fill_defaults(
        &self,
        schema: &Schema,
        partial: Option<Value>,
        definitions: &Definitions,
    ) -> Result<Option<Value>, CollaboratorError> {
        (**self).fill_defaults(schema, partial, definitions)
    }
}
