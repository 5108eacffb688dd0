// crates/schema-form-core/src/runtime/field.rs
// ============================================================================
// Module: Schema Form Variant Field
// Description: Render-time record and event handling for one variant field.
// Purpose: Expose the active option, its selector, and switch/update events.
// Dependencies: crate::{core, interfaces, runtime}, serde
// ============================================================================

//! ## Overview
//! A [`VariantField`] carries the props the form engine hands a sum-type
//! field on each render: its path, options, current data, and definitions.
//! Selection state is not stored in the field; every query and event takes
//! the [`SelectionStore`] explicitly so state stays keyed by field identity.
//!
//! Rendering produces a selector view model (one labeled entry per option)
//! plus whatever the host's [`FieldDispatcher`] renders for the active option.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::core::Definitions;
use crate::core::FieldPath;
use crate::core::Schema;
use crate::core::TypeDecl;
use crate::interfaces::ChangeSink;
use crate::interfaces::DefaultFiller;
use crate::interfaces::FieldDispatcher;
use crate::interfaces::SchemaMatcher;
use crate::interfaces::SchemaResolver;
use crate::runtime::resolver::SelectionState;
use crate::runtime::resolver::Transition;
use crate::runtime::resolver::VariantError;
use crate::runtime::resolver::VariantResolver;
use crate::runtime::resolver::VariantResolverConfig;
use crate::runtime::store::SelectionStore;

// ============================================================================
// SECTION: View Models
// ============================================================================

/// One entry of the option selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionLabel {
    /// Displayed label.
    pub label: String,
    /// Option index submitted when chosen.
    pub value: usize,
}

/// Option selector widget model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSelector {
    /// DOM id of the selector.
    pub id: String,
    /// Widget name used to render the selector.
    pub widget: String,
    /// Currently selected option index.
    pub value: usize,
    /// Selectable options in declaration order.
    pub options: Vec<OptionLabel>,
}

/// Rendered variant field: selector plus the active option's body.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantFieldView<N> {
    /// Option selector model.
    pub selector: OptionSelector,
    /// Body rendered for the active option; absent when there are no options.
    pub body: Option<N>,
}

// ============================================================================
// SECTION: Variant Field
// ============================================================================

/// Props and event handling for one sum-type field.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantField {
    /// Field identity.
    path: FieldPath,
    /// Alternatives in declaration order.
    options: Vec<Schema>,
    /// Type of the enclosing schema, inherited by untyped options.
    base_type: Option<TypeDecl>,
    /// Current form data for the field.
    form_data: Option<Value>,
    /// Shared definitions registry.
    definitions: Definitions,
    /// Selector widget override from UI options.
    widget: Option<String>,
}

impl VariantField {
    /// Creates a field record.
    #[must_use]
    pub const fn new(
        path: FieldPath,
        options: Vec<Schema>,
        form_data: Option<Value>,
        definitions: Definitions,
    ) -> Self {
        Self {
            path,
            options,
            base_type: None,
            form_data,
            definitions,
            widget: None,
        }
    }

    /// Sets the type inherited by options that declare none.
    #[must_use]
    pub fn with_base_type(mut self, base_type: impl Into<TypeDecl>) -> Self {
        self.base_type = Some(base_type.into());
        self
    }

    /// Overrides the selector widget.
    #[must_use]
    pub fn with_widget(mut self, widget: impl Into<String>) -> Self {
        self.widget = Some(widget.into());
        self
    }

    /// Returns the field path.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &[Schema] {
        &self.options
    }

    /// Returns the current form data.
    #[must_use]
    pub const fn form_data(&self) -> Option<&Value> {
        self.form_data.as_ref()
    }

    /// Returns the definitions registry.
    #[must_use]
    pub const fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Creates selection state on first render; later calls keep the existing state.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::Collaborator`] when matching fails.
    pub fn mount<M, R, F>(
        &self,
        resolver: &VariantResolver<M, R, F>,
        store: &mut SelectionStore,
    ) -> Result<SelectionState, VariantError>
    where
        M: SchemaMatcher,
        R: SchemaResolver,
        F: DefaultFiller,
    {
        if let Some(state) = store.get(&self.path) {
            return Ok(state);
        }
        let state = resolver.initial_selection(
            &self.path,
            &self.options,
            self.form_data.as_ref(),
            &self.definitions,
        )?;
        store.insert(self.path.clone(), state);
        Ok(state)
    }

    /// Discards the selection state of this field and of fields nested in it.
    pub fn unmount(&self, store: &mut SelectionStore) -> usize {
        store.unmount_subtree(&self.path)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns the active option index.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state.
    pub fn active_index(&self, store: &SelectionStore) -> Result<usize, VariantError> {
        store
            .get(&self.path)
            .map(SelectionState::active_index)
            .ok_or_else(|| VariantError::NotMounted(self.path.clone()))
    }

    /// Returns the active option as declared.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state.
    pub fn active_option(&self, store: &SelectionStore) -> Result<Option<&Schema>, VariantError> {
        Ok(self.options.get(self.active_index(store)?))
    }

    /// Returns the active option, typed with the base type when it declares none.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state.
    pub fn active_schema(
        &self,
        store: &SelectionStore,
    ) -> Result<Option<Cow<'_, Schema>>, VariantError> {
        Ok(self.active_option(store)?.map(|option| self.inherit_base_type(option)))
    }

    /// Returns the active option dereferenced through the resolver's collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state, or
    /// [`VariantError::Collaborator`] when dereferencing fails.
    pub fn resolved_active_schema<M, R, F>(
        &self,
        resolver: &VariantResolver<M, R, F>,
        store: &SelectionStore,
    ) -> Result<Option<Schema>, VariantError>
    where
        M: SchemaMatcher,
        R: SchemaResolver,
        F: DefaultFiller,
    {
        let Some(schema) = self.active_schema(store)? else {
            return Ok(None);
        };
        let resolved = resolver.schema_resolver().resolve(
            &schema,
            &self.definitions,
            self.form_data.as_ref(),
        )?;
        Ok(Some(resolved))
    }

    /// Returns selector labels: the option title, or `"<prefix> N"` (1-based).
    #[must_use]
    pub fn option_labels(&self, config: &VariantResolverConfig) -> Vec<OptionLabel> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| OptionLabel {
                label: option
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("{} {}", config.label_prefix, index + 1)),
                value: index,
            })
            .collect()
    }

    /// Builds the option selector model.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state.
    pub fn selector(
        &self,
        store: &SelectionStore,
        config: &VariantResolverConfig,
    ) -> Result<OptionSelector, VariantError> {
        Ok(OptionSelector {
            id: self.path.selector_id(),
            widget: self.widget.clone().unwrap_or_else(|| config.selector_widget.clone()),
            value: self.active_index(store)?,
            options: self.option_labels(config),
        })
    }

    /// Renders the selector and delegates the active option's body to `dispatcher`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state.
    pub fn render<D: FieldDispatcher>(
        &self,
        store: &SelectionStore,
        config: &VariantResolverConfig,
        dispatcher: &D,
    ) -> Result<VariantFieldView<D::Node>, VariantError> {
        let selector = self.selector(store, config)?;
        let body = self
            .active_schema(store)?
            .map(|schema| dispatcher.dispatch(&schema, self.form_data.as_ref(), &self.path));
        Ok(VariantFieldView {
            selector,
            body,
        })
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Applies data and options pushed from outside the field.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state, or
    /// [`VariantError::Collaborator`] when matching fails.
    pub fn on_upstream_change<M, R, F>(
        &mut self,
        resolver: &VariantResolver<M, R, F>,
        store: &mut SelectionStore,
        form_data: Option<Value>,
        options: Vec<Schema>,
    ) -> Result<Transition, VariantError>
    where
        M: SchemaMatcher,
        R: SchemaResolver,
        F: DefaultFiller,
    {
        let state =
            store.get_mut(&self.path).ok_or_else(|| VariantError::NotMounted(self.path.clone()))?;
        let transition = resolver.on_upstream_change(
            &self.path,
            state,
            form_data.as_ref(),
            &options,
            &self.definitions,
        )?;
        self.form_data = form_data;
        self.options = options;
        Ok(transition)
    }

    /// Handles the user picking option `index`: reconciles data, emits it, and selects the option.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotMounted`] when the field has no state, or
    /// the errors of [`VariantResolver::reconcile`]. Nothing is emitted on error.
    pub fn on_user_switch<M, R, F, S>(
        &mut self,
        resolver: &VariantResolver<M, R, F>,
        store: &mut SelectionStore,
        index: usize,
        sink: &mut S,
    ) -> Result<Option<Value>, VariantError>
    where
        M: SchemaMatcher,
        R: SchemaResolver,
        F: DefaultFiller,
        S: ChangeSink + ?Sized,
    {
        let state =
            store.get_mut(&self.path).ok_or_else(|| VariantError::NotMounted(self.path.clone()))?;
        let next = resolver.switch_to(
            &self.path,
            state,
            index,
            self.form_data.as_ref(),
            &self.options,
            &self.definitions,
        )?;
        sink.emit(next.clone());
        self.form_data.clone_from(&next);
        Ok(next)
    }

    /// Returns `option` with the base type filled in when it declares no type.
    fn inherit_base_type<'a>(&self, option: &'a Schema) -> Cow<'a, Schema> {
        match (&option.schema_type, &self.base_type) {
            (None, Some(base_type)) => Cow::Owned(Schema {
                schema_type: Some(base_type.clone()),
                ..option.clone()
            }),
            _ => Cow::Borrowed(option),
        }
    }
}
