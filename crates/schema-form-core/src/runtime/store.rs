// crates/schema-form-core/src/runtime/store.rs
// ============================================================================
// Module: Schema Form Selection Store
// Description: Selection state keyed by field identity.
// Purpose: Tie each variant field's selection to its path in the form tree.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Selection state lives as long as a field is present in the form tree.
//! The store keeps one [`SelectionState`] per [`FieldPath`]: it is created
//! on first mount, read on every render, and dropped when the field (or an
//! ancestor) unmounts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::FieldPath;
use crate::runtime::resolver::SelectionState;

// ============================================================================
// SECTION: Selection Store
// ============================================================================

/// Selection state for every mounted variant field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    /// Selection state keyed by field path.
    entries: BTreeMap<FieldPath, SelectionState>,
}

impl SelectionStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the selection for a field, if mounted.
    #[must_use]
    pub fn get(&self, field: &FieldPath) -> Option<SelectionState> {
        self.entries.get(field).copied()
    }

    /// Returns a mutable handle to a field's selection, if mounted.
    pub fn get_mut(&mut self, field: &FieldPath) -> Option<&mut SelectionState> {
        self.entries.get_mut(field)
    }

    /// Returns true when the field has selection state.
    #[must_use]
    pub fn is_mounted(&self, field: &FieldPath) -> bool {
        self.entries.contains_key(field)
    }

    /// Stores the selection for a field, returning the previous one.
    pub fn insert(&mut self, field: FieldPath, state: SelectionState) -> Option<SelectionState> {
        self.entries.insert(field, state)
    }

    /// Drops the selection of a single field.
    pub fn unmount(&mut self, field: &FieldPath) -> Option<SelectionState> {
        self.entries.remove(field)
    }

    /// Drops the selection of a field and every field nested beneath it.
    ///
    /// Returns the number of entries removed.
    pub fn unmount_subtree(&mut self, field: &FieldPath) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| !path.is_within(field));
        before - self.entries.len()
    }

    /// Returns the number of mounted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no field is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over mounted field paths in order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.entries.keys()
    }
}
