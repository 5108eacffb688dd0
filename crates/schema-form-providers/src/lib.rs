// crates/schema-form-providers/src/lib.rs
// ============================================================================
// Module: Schema Form Providers
// Description: Built-in matcher, resolver, and default filler.
// Purpose: Provide ready-made collaborators for the Schema Form core.
// Dependencies: schema-form-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Schema Form core consumes matching, dereferencing, and defaulting through
//! interfaces. This crate ships JSON Schema based implementations of all
//! three so a form engine without its own can use the core directly.
//! Invariants:
//! - Absent form data matches no variant.
//! - Reference chains and recursive defaults are bounded; cycles fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builtin;
pub mod defaults;
pub mod matcher;
pub mod retrieve;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builtin::BuiltinCollaborators;
pub use defaults::DEFAULT_MAX_DEFAULTS_DEPTH;
pub use defaults::DefaultFormState;
pub use matcher::JsonSchemaMatcher;
pub use matcher::MAX_CACHED_VALIDATORS;
pub use retrieve::DEFAULT_MAX_REF_DEPTH;
pub use retrieve::DefinitionResolver;
