// crates/schema-form-providers/src/builtin.rs
// ============================================================================
// Module: Builtin Collaborators
// Description: One value implementing every collaborator interface.
// Purpose: Wire the built-in matcher, resolver, and filler into a resolver.
// Dependencies: schema-form-core, serde_json
// ============================================================================

//! ## Overview
//! [`BuiltinCollaborators`] bundles [`JsonSchemaMatcher`],
//! [`DefinitionResolver`], and [`DefaultFormState`] so a variant resolver can
//! be built from one value. Core exposes blanket impls for references, so a
//! single bundle can back all three collaborator slots by reference.

// ============================================================================
// SECTION: Imports
// ============================================================================

use schema_form_core::CollaboratorError;
use schema_form_core::DefaultFiller;
use schema_form_core::Definitions;
use schema_form_core::Schema;
use schema_form_core::SchemaMatcher;
use schema_form_core::SchemaResolver;
use schema_form_core::VariantResolver;
use schema_form_core::VariantResolverConfig;
use serde_json::Value;

use crate::defaults::DefaultFormState;
use crate::matcher::JsonSchemaMatcher;
use crate::retrieve::DefinitionResolver;

// ============================================================================
// SECTION: Bundle
// ============================================================================

/// Built-in implementations of every collaborator interface.
#[derive(Debug, Clone, Default)]
pub struct BuiltinCollaborators {
    /// Validation-backed matcher.
    pub matcher: JsonSchemaMatcher,
    /// `$ref` dereferencer.
    pub resolver: DefinitionResolver,
    /// Default filler.
    pub defaults: DefaultFormState,
}

impl BuiltinCollaborators {
    /// Creates a variant resolver backed by these collaborators.
    #[must_use]
    pub fn variant_resolver(
        self,
        config: VariantResolverConfig,
    ) -> VariantResolver<JsonSchemaMatcher, DefinitionResolver, DefaultFormState> {
        VariantResolver::new(self.matcher, self.resolver, self.defaults, config)
    }
}

impl SchemaMatcher for BuiltinCollaborators {
    fn matches(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<bool, CollaboratorError> {
        self.matcher.matches(value, schema, definitions)
    }
}

impl SchemaResolver for BuiltinCollaborators {
    fn resolve(
        &self,
        schema: &Schema,
        definitions: &Definitions,
        hint: Option<&Value>,
    ) -> Result<Schema, CollaboratorError> {
        self.resolver.resolve(schema, definitions, hint)
    }
}

impl DefaultFiller for BuiltinCollaborators {
    fn fill_defaults(
        &self,
        schema: &Schema,
        partial: Option<Value>,
        definitions: &Definitions,
    ) -> Result<Option<Value>, CollaboratorError> {
        self.defaults.fill_defaults(schema, partial, definitions)
    }
}
