// crates/schema-form-core/src/runtime/resolver.rs
// ============================================================================
// Module: Schema Form Variant Resolver
// Description: Variant matching, sticky selection, and explicit switching.
// Purpose: Keep a sum-type field's active alternative in step with its data.
// Dependencies: crate::{core, interfaces, runtime}, serde, thiserror
// ============================================================================

//! ## Overview
//! A field whose schema offers alternatives (`anyOf` / `oneOf`) keeps one
//! active option. The resolver picks it by testing the data against each
//! option in declaration order and taking the first match. When nothing
//! matches, typically because the user is mid-edit, the previous selection
//! is kept. An explicit switch reconciles the data for the new option and
//! fills its defaults.
//!
//! Selection state is a plain [`SelectionState`] value passed in by the
//! caller; the resolver holds collaborators and configuration only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::Definitions;
use crate::core::FieldPath;
use crate::core::Schema;
use crate::interfaces::CollaboratorError;
use crate::interfaces::DefaultFiller;
use crate::interfaces::SchemaMatcher;
use crate::interfaces::SchemaResolver;
use crate::runtime::audit::FieldAuditEvent;
use crate::runtime::audit::FieldAuditSink;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::reconcile::reconciled_base;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default label prefix for untitled options ("Option 1", "Option 2", ...).
pub const DEFAULT_LABEL_PREFIX: &str = "Option";
/// Default widget used to pick the active option.
pub const DEFAULT_SELECTOR_WIDGET: &str = "select";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the variant resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantResolverConfig {
    /// Prefix for labels of options without a title.
    pub label_prefix: String,
    /// Widget used for the option selector unless the field overrides it.
    pub selector_widget: String,
}

impl Default for VariantResolverConfig {
    fn default() -> Self {
        Self {
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            selector_widget: DEFAULT_SELECTOR_WIDGET.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Selection State
// ============================================================================

/// Active option of one variant field.
///
/// # Invariants
/// - `active_index < options.len()` whenever the field has options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionState {
    /// Index of the active option.
    active_index: usize,
}

impl SelectionState {
    /// Creates a selection pointing at `active_index`.
    #[must_use]
    pub const fn new(active_index: usize) -> Self {
        Self {
            active_index,
        }
    }

    /// Returns the active option index.
    #[must_use]
    pub const fn active_index(self) -> usize {
        self.active_index
    }
}

/// Outcome of re-resolving a field after upstream data changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// The data still matches the active option.
    Unchanged {
        /// Active index.
        index: usize,
    },
    /// Nothing matched; the previous selection was kept.
    Sticky {
        /// Active index.
        index: usize,
    },
    /// A different option now matches and became active.
    Rematched {
        /// Previously active index.
        from: usize,
        /// Newly active index.
        to: usize,
    },
    /// Nothing matched and the kept index no longer exists; reset to zero.
    Reset {
        /// Previously active index.
        from: usize,
    },
}

impl Transition {
    /// Returns the active index after the transition.
    #[must_use]
    pub const fn active_index(self) -> usize {
        match self {
            Self::Unchanged {
                index,
            }
            | Self::Sticky {
                index,
            } => index,
            Self::Rematched {
                to, ..
            } => to,
            Self::Reset {
                ..
            } => 0,
        }
    }

    /// Returns true when the active index changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        matches!(
            self,
            Self::Rematched {
                ..
            } | Self::Reset {
                ..
            }
        )
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Variant resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    /// A switch named an option that does not exist.
    #[error("option index {index} out of range for {len} options")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available options.
        len: usize,
    },
    /// A selector emitted a value that is not an option index.
    #[error("invalid option selection: {0}")]
    InvalidSelection(String),
    /// The field has no selection state.
    #[error("variant field not mounted: {0}")]
    NotMounted(FieldPath),
    /// A collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

// ============================================================================
// SECTION: Variant Resolver
// ============================================================================

/// Resolves and switches the active option of variant fields.
pub struct VariantResolver<M, R, F> {
    /// Data-to-schema matcher.
    matcher: M,
    /// Schema dereferencer.
    resolver: R,
    /// Default filler.
    filler: F,
    /// Resolver configuration.
    config: VariantResolverConfig,
    /// Selection audit sink.
    audit: Arc<dyn FieldAuditSink>,
}

impl<M, R, F> VariantResolver<M, R, F>
where
    M: SchemaMatcher,
    R: SchemaResolver,
    F: DefaultFiller,
{
    /// Creates a resolver over the given collaborators.
    pub fn new(matcher: M, resolver: R, filler: F, config: VariantResolverConfig) -> Self {
        Self {
            matcher,
            resolver,
            filler,
            config,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn FieldAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the resolver configuration.
    #[must_use]
    pub const fn config(&self) -> &VariantResolverConfig {
        &self.config
    }

    /// Returns the schema resolver collaborator.
    #[must_use]
    pub const fn schema_resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the index of the first option `form_data` matches.
    ///
    /// Returns `Ok(None)` when no option matches. Ties go to the earliest
    /// option in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::Collaborator`] when the matcher fails.
    pub fn resolve_match(
        &self,
        form_data: Option<&Value>,
        options: &[Schema],
        definitions: &Definitions,
    ) -> Result<Option<usize>, VariantError> {
        for (index, option) in options.iter().enumerate() {
            if self.matcher.matches(form_data, option, definitions)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Computes the selection for a newly mounted field.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::Collaborator`] when the matcher fails.
    pub fn initial_selection(
        &self,
        field: &FieldPath,
        options: &[Schema],
        form_data: Option<&Value>,
        definitions: &Definitions,
    ) -> Result<SelectionState, VariantError> {
        let index = self.resolve_match(form_data, options, definitions)?.unwrap_or(0);
        self.audit.record(&FieldAuditEvent::new(
            "variant_mounted",
            field,
            None,
            index,
            options.len(),
        ));
        Ok(SelectionState::new(index))
    }

    /// Re-resolves the selection after form data or options changed upstream.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::Collaborator`] when the matcher fails; the
    /// state is left untouched in that case.
    pub fn on_upstream_change(
        &self,
        field: &FieldPath,
        state: &mut SelectionState,
        form_data: Option<&Value>,
        options: &[Schema],
        definitions: &Definitions,
    ) -> Result<Transition, VariantError> {
        let current = state.active_index;
        let transition = match self.resolve_match(form_data, options, definitions)? {
            Some(index) if index == current => Transition::Unchanged {
                index,
            },
            Some(index) => Transition::Rematched {
                from: current,
                to: index,
            },
            None if current < options.len() || options.is_empty() => Transition::Sticky {
                index: current,
            },
            None => Transition::Reset {
                from: current,
            },
        };
        state.active_index = transition.active_index();
        let event = match transition {
            Transition::Unchanged {
                ..
            } => None,
            Transition::Sticky {
                ..
            } => Some("variant_sticky"),
            Transition::Rematched {
                ..
            } => Some("variant_rematched"),
            Transition::Reset {
                ..
            } => Some("variant_reset"),
        };
        if let Some(event) = event {
            self.audit.record(&FieldAuditEvent::new(
                event,
                field,
                Some(current),
                state.active_index,
                options.len(),
            ));
        }
        Ok(transition)
    }

    /// Computes the form data that results from switching to `new_index`.
    ///
    /// This is a pure function of its inputs; callers apply the result and
    /// update selection state themselves (see [`Self::switch_to`]).
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::IndexOutOfRange`] when `new_index` names no
    /// option, or [`VariantError::Collaborator`] when dereferencing or
    /// defaulting fails.
    pub fn reconcile(
        &self,
        new_index: usize,
        current: Option<&Value>,
        options: &[Schema],
        definitions: &Definitions,
    ) -> Result<Option<Value>, VariantError> {
        let option = options.get(new_index).ok_or(VariantError::IndexOutOfRange {
            index: new_index,
            len: options.len(),
        })?;
        let resolved = self.resolver.resolve(option, definitions, current)?;
        let base = reconciled_base(current, options, new_index, &resolved);
        Ok(self.filler.fill_defaults(option, base, definitions)?)
    }

    /// Switches `state` to `new_index` and returns the reconciled form data.
    ///
    /// Switching to the already active index still re-applies defaults.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::reconcile`]; the state is left untouched
    /// on error.
    pub fn switch_to(
        &self,
        field: &FieldPath,
        state: &mut SelectionState,
        new_index: usize,
        current: Option<&Value>,
        options: &[Schema],
        definitions: &Definitions,
    ) -> Result<Option<Value>, VariantError> {
        let next = self.reconcile(new_index, current, options, definitions)?;
        let previous = state.active_index;
        state.active_index = new_index;
        self.audit.record(&FieldAuditEvent::new(
            "variant_switched",
            field,
            Some(previous),
            new_index,
            options.len(),
        ));
        Ok(next)
    }
}

// ============================================================================
// SECTION: Selector Values
// ============================================================================

/// Parses the raw value emitted by an option selector widget.
///
/// # Errors
///
/// Returns [`VariantError::InvalidSelection`] when the value is not a
/// non-negative integer.
pub fn parse_selector_value(raw: &str) -> Result<usize, VariantError> {
    raw.trim().parse::<usize>().map_err(|_| VariantError::InvalidSelection(raw.to_string()))
}
