// crates/schema-form-core/src/runtime/mod.rs
// ============================================================================
// Module: Schema Form Runtime
// Description: Variant resolution, reconciliation, requiredness, and audit.
// Purpose: Execute selection decisions against host-provided collaborators.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement variant matching and switching, the selection
//! store, the variant field render path, checkbox requiredness, and audit
//! sinks. Everything runs synchronously on the calling thread.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod checkbox;
pub mod field;
pub mod reconcile;
pub mod requiredness;
pub mod resolver;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FieldAuditEvent;
pub use audit::FieldAuditSink;
pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use checkbox::CheckboxFlags;
pub use checkbox::CheckboxState;
pub use field::OptionLabel;
pub use field::OptionSelector;
pub use field::VariantField;
pub use field::VariantFieldView;
pub use reconcile::discard_foreign_keys;
pub use reconcile::reconciled_base;
pub use requiredness::AllOfMode;
pub use requiredness::DEFAULT_MAX_DEPTH;
pub use requiredness::Requiredness;
pub use requiredness::RequirednessConfig;
pub use requiredness::evaluate_requiredness;
pub use requiredness::requires_true_value;
pub use resolver::DEFAULT_LABEL_PREFIX;
pub use resolver::DEFAULT_SELECTOR_WIDGET;
pub use resolver::SelectionState;
pub use resolver::Transition;
pub use resolver::VariantError;
pub use resolver::VariantResolver;
pub use resolver::VariantResolverConfig;
pub use resolver::parse_selector_value;
pub use store::SelectionStore;
