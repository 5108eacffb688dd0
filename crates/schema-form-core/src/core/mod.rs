// crates/schema-form-core/src/core/mod.rs
// ============================================================================
// Module: Schema Form Core Types
// Description: Canonical schema, value, and identifier types.
// Purpose: Provide stable, serializable types shared by the resolver runtime.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe schemas, form data values, and field identity. They
//! carry no behavior beyond parsing and pure helpers; the runtime module owns
//! selection and reconciliation.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod schema;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::FieldPath;
pub use identifiers::ROOT_FIELD_ID;
pub use schema::Definitions;
pub use schema::Schema;
pub use schema::SchemaConstraint;
pub use schema::SchemaType;
pub use schema::TypeDecl;
pub use value::ValueKind;
pub use value::exclude_keys;
pub use value::guess_type;
pub use value::is_truthy;
