// crates/schema-form-core/src/runtime/requiredness.rs
// ============================================================================
// Module: Schema Form Requiredness Evaluation
// Description: Decides whether a schema forces a value to be `true`.
// Purpose: Let checkbox widgets mark themselves mandatory only when unchecked is invalid.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! An unchecked checkbox fails native form validation when marked required,
//! so a checkbox is only required when its schema admits nothing but `true`.
//! Evaluation looks through `const`, single-valued `enum`, single-branch
//! `anyOf`/`oneOf`, and `allOf`. Multi-branch `anyOf`/`oneOf` cannot be
//! decided statically and yield [`Requiredness::Indeterminate`].
//!
//! `allOf` counts as requiring `true` when *any* conjunct does
//! ([`AllOfMode::Any`], the default). [`AllOfMode::Every`] is the stricter
//! logical AND for hosts that opt into it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::Schema;
use crate::core::SchemaConstraint;
use crate::core::is_truthy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default recursion limit for nested combinators.
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// How `allOf` conjuncts combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllOfMode {
    /// Required when any conjunct is required.
    #[default]
    Any,
    /// Required only when every conjunct is required.
    Every,
}

/// Requiredness evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirednessConfig {
    /// `allOf` combination rule.
    pub all_of: AllOfMode,
    /// Maximum combinator nesting depth evaluated before giving up.
    pub max_depth: usize,
}

impl Default for RequirednessConfig {
    fn default() -> Self {
        Self {
            all_of: AllOfMode::Any,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Outcome of requiredness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requiredness {
    /// The schema admits only `true`.
    Required,
    /// No constraint forces `true`.
    NotRequired,
    /// A multi-branch combinator or the depth limit prevented a decision.
    Indeterminate,
}

impl Requiredness {
    /// Returns true only for [`Requiredness::Required`].
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Returns true when `schema` forces a value of `true`, using default settings.
#[must_use]
pub fn requires_true_value(schema: &Schema) -> bool {
    evaluate_requiredness(schema, &RequirednessConfig::default()).is_required()
}

/// Evaluates whether `schema` forces a value of `true`.
#[must_use]
pub fn evaluate_requiredness(schema: &Schema, config: &RequirednessConfig) -> Requiredness {
    evaluate_at_depth(schema, config, 0)
}

/// Evaluates one schema node at the given nesting depth.
fn evaluate_at_depth(schema: &Schema, config: &RequirednessConfig, depth: usize) -> Requiredness {
    if depth > config.max_depth {
        return Requiredness::Indeterminate;
    }
    let mut undecided = false;
    for constraint in schema.constraints() {
        match constraint {
            SchemaConstraint::Const(value) => {
                if is_truthy(value) {
                    return Requiredness::Required;
                }
            }
            SchemaConstraint::Enum(values) => {
                if let [Value::Bool(true)] = values {
                    return Requiredness::Required;
                }
            }
            SchemaConstraint::AnyOf(alternatives) | SchemaConstraint::OneOf(alternatives) => {
                if let [sole] = alternatives {
                    return evaluate_at_depth(sole, config, depth + 1);
                }
                undecided |= alternatives.len() > 1;
            }
            SchemaConstraint::AllOf(conjuncts) => {
                return evaluate_all_of(conjuncts, config, depth + 1);
            }
        }
    }
    if undecided { Requiredness::Indeterminate } else { Requiredness::NotRequired }
}

/// Combines `allOf` conjuncts according to the configured mode.
fn evaluate_all_of(conjuncts: &[Schema], config: &RequirednessConfig, depth: usize) -> Requiredness {
    let mut outcomes = conjuncts.iter().map(|conjunct| evaluate_at_depth(conjunct, config, depth));
    let required = match config.all_of {
        AllOfMode::Any => outcomes.any(Requiredness::is_required),
        AllOfMode::Every => !conjuncts.is_empty() && outcomes.all(Requiredness::is_required),
    };
    if required { Requiredness::Required } else { Requiredness::NotRequired }
}
