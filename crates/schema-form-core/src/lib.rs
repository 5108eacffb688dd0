// crates/schema-form-core/src/lib.rs
// ============================================================================
// Module: Schema Form Core Library
// Description: Public API surface for the Schema Form core.
// Purpose: Expose schema types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Schema Form core resolves which alternative of a sum-type schema field
//! is active, reconciles form data when the user switches alternatives, and
//! decides whether a boolean schema forces `true`. Matching, dereferencing,
//! and defaulting are consumed through explicit interfaces so any form
//! engine can plug in its own implementations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::ChangeSink;
pub use interfaces::CollaboratorError;
pub use interfaces::DefaultFiller;
pub use interfaces::FieldDispatcher;
pub use interfaces::SchemaMatcher;
pub use interfaces::SchemaResolver;
pub use runtime::AllOfMode;
pub use runtime::DEFAULT_LABEL_PREFIX;
pub use runtime::DEFAULT_MAX_DEPTH;
pub use runtime::DEFAULT_SELECTOR_WIDGET;
pub use runtime::CheckboxFlags;
pub use runtime::CheckboxState;
pub use runtime::FieldAuditEvent;
pub use runtime::FieldAuditSink;
pub use runtime::FileAuditSink;
pub use runtime::MemoryAuditSink;
pub use runtime::NoopAuditSink;
pub use runtime::OptionLabel;
pub use runtime::OptionSelector;
pub use runtime::Requiredness;
pub use runtime::RequirednessConfig;
pub use runtime::SelectionState;
pub use runtime::SelectionStore;
pub use runtime::StderrAuditSink;
pub use runtime::Transition;
pub use runtime::VariantError;
pub use runtime::VariantField;
pub use runtime::VariantFieldView;
pub use runtime::VariantResolver;
pub use runtime::VariantResolverConfig;
pub use runtime::discard_foreign_keys;
pub use runtime::evaluate_requiredness;
pub use runtime::parse_selector_value;
pub use runtime::reconciled_base;
pub use runtime::requires_true_value;
