//! Form Definition Builder
//!
//! Interactive authoring of a [`FormDefinition`]. The builder owns the form
//! under construction plus an explicit draft field buffer; the draft exists
//! only while a field is being edited, which is also the builder's state
//! machine: `Idle` when there is no draft, `AddingField` while one is open.

use thiserror::Error;
use tracing::debug;

use crate::domain::{
    FieldCandidate, FieldId, FieldType, FormCategory, FormDefinition, FormError,
};

/// Visible builder states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderState {
    Idle,
    AddingField,
}

/// Interactive builder for one form definition.
#[derive(Clone, Debug)]
pub struct FormBuilder {
    form: FormDefinition,
    draft: Option<FieldCandidate>,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        Self {
            form: FormDefinition::new(""),
            draft: None,
        }
    }

    /// Resume editing an existing definition.
    pub fn from_form(form: FormDefinition) -> Self {
        Self { form, draft: None }
    }

    pub fn state(&self) -> BuilderState {
        if self.draft.is_some() {
            BuilderState::AddingField
        } else {
            BuilderState::Idle
        }
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn draft(&self) -> Option<&FieldCandidate> {
        self.draft.as_ref()
    }

    // =========================================================================
    // Form metadata
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    pub fn set_category(&mut self, category: FormCategory) {
        self.form.category = category;
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.form.is_public = is_public;
    }

    // =========================================================================
    // Draft field editing (Idle -> AddingField -> Idle)
    // =========================================================================

    /// Open a draft for a field of the given type. Re-opening while a draft
    /// exists keeps the buffer and switches its type.
    pub fn begin_field(&mut self, field_type: FieldType) {
        match self.draft.as_mut() {
            Some(draft) => draft.field_type = field_type,
            None => self.draft = Some(FieldCandidate::new(field_type)),
        }
    }

    pub fn set_draft_label(&mut self, label: impl Into<String>) -> Result<(), BuilderError> {
        self.draft_mut()?.label = label.into();
        Ok(())
    }

    pub fn set_draft_placeholder(
        &mut self,
        placeholder: impl Into<String>,
    ) -> Result<(), BuilderError> {
        let placeholder = placeholder.into();
        self.draft_mut()?.placeholder = if placeholder.is_empty() {
            None
        } else {
            Some(placeholder)
        };
        Ok(())
    }

    pub fn set_draft_required(&mut self, required: bool) -> Result<(), BuilderError> {
        self.draft_mut()?.required = required;
        Ok(())
    }

    /// Replace the draft's option lines verbatim. Blank lines survive here so
    /// the operator can keep typing; they are filtered when the field is
    /// applied, not before.
    pub fn set_draft_options(&mut self, lines: Vec<String>) -> Result<(), BuilderError> {
        self.draft_mut()?.options = lines;
        Ok(())
    }

    /// Validate and append the draft to the form, then clear the draft.
    /// The draft survives a rejected apply so the operator can correct it.
    pub fn apply_field(&mut self) -> Result<FieldId, BuilderError> {
        let draft = self.draft.as_ref().ok_or(BuilderError::NotAddingField)?;
        let id = self.form.add_field(draft)?;
        self.draft = None;
        Ok(id)
    }

    /// Discard the draft and return to idle.
    pub fn cancel_field(&mut self) {
        self.draft = None;
    }

    // =========================================================================
    // Field list operations (any state)
    // =========================================================================

    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        self.form.remove_field(id)
    }

    pub fn duplicate_field(&mut self, id: &FieldId) -> Option<FieldId> {
        self.form.duplicate_field(id)
    }

    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        self.form.move_field(from, to).map_err(BuilderError::from)
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Check save preconditions and hand out the definition for transport.
    ///
    /// The builder is left untouched either way: a transport failure must not
    /// lose the operator's work, and a precondition failure is correctable.
    pub fn save(&self) -> Result<&FormDefinition, BuilderError> {
        if self.form.title.trim().is_empty() {
            return Err(BuilderError::TitleRequired);
        }
        if self.form.is_empty() {
            return Err(BuilderError::NoFields);
        }
        debug!(title = %self.form.title, fields = self.form.fields.len(), "form ready to save");
        Ok(&self.form)
    }

    /// Consume the builder once the save round-trip succeeded.
    pub fn into_form(self) -> FormDefinition {
        self.form
    }

    fn draft_mut(&mut self) -> Result<&mut FieldCandidate, BuilderError> {
        self.draft.as_mut().ok_or(BuilderError::NotAddingField)
    }
}

/// Builder-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// Save requires a title.
    #[error("form title is required")]
    TitleRequired,

    /// Save requires at least one field.
    #[error("form must have at least one field")]
    NoFields,

    /// Draft operations require an open draft.
    #[error("no field is being edited")]
    NotAddingField,

    #[error(transparent)]
    Field(#[from] FormError),
}
