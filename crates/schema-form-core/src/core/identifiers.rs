// crates/schema-form-core/src/core/identifiers.rs
// ============================================================================
// Module: Schema Form Identifiers
// Description: Field identity within the rendered form tree.
// Purpose: Key per-field selection state by field identity instead of instance.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`FieldPath`] is the stable id of a field in the form tree, built the
//! same way the id schema builds DOM ids: the root is `root` and each nested
//! property appends `_<key>`. Selection state and selector widget ids derive
//! from it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Id of the root field.
pub const ROOT_FIELD_ID: &str = "root";
/// Suffix appended to a field id for its variant selector widget.
const SELECTOR_SUFFIX: &str = "_anyof_select";

// ============================================================================
// SECTION: Field Path
// ============================================================================

/// Field identifier within a rendered form.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a new field path.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the path of the root field.
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT_FIELD_ID.to_string())
    }

    /// Returns the path of a nested property field.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        Self(format!("{}_{key}", self.0))
    }

    /// Returns true when `self` is `other` or nested beneath it.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        self.0 == other.0
            || self.0.strip_prefix(other.0.as_str()).is_some_and(|rest| rest.starts_with('_'))
    }

    /// Returns the DOM id of this field's variant selector.
    #[must_use]
    pub fn selector_id(&self) -> String {
        format!("{}{SELECTOR_SUFFIX}", self.0)
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
