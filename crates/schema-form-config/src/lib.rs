// crates/schema-form-config/src/lib.rs
// ============================================================================
// Module: Schema Form Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for schema-form.toml semantics.
// Dependencies: schema-form-core, serde, toml
// ============================================================================

//! ## Overview
//! `schema-form-config` defines the TOML configuration for variant labels,
//! the selector widget, requiredness evaluation, and audit logging, and maps
//! it onto the core configuration types.
//!
//! Security posture: config inputs are untrusted; loading fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
