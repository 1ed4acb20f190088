//! Form Definition Aggregate
//!
//! A form is an ordered list of typed fields plus presentation metadata.
//! All field mutations go through the aggregate so ordering, id minting and
//! option cleaning stay consistent.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::events::FormEvent;
use crate::domain::value_objects::FieldId;

/// Kind of input a field renders and the value shape it collects.
///
/// Every consumer (control mapping, validation, serialization) matches
/// exhaustively, so a new variant fails to compile until handled everywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Number,
    Date,
    Phone,
}

impl FieldType {
    /// Choice types carry an options list.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Checkbox is the only type collecting a set of values.
    pub fn collects_many(self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// Human-readable name for listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "short text",
            Self::Email => "email",
            Self::Textarea => "long text",
            Self::Select => "dropdown",
            Self::Radio => "single choice",
            Self::Checkbox => "multiple choice",
            Self::Number => "number",
            Self::Date => "date",
            Self::Phone => "phone",
        }
    }
}

/// One question in a form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    /// Present only for choice types; blank entries are filtered on apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldDefinition {
    /// Options as a slice, empty for non-choice fields.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// Field data as edited by an operator, before an id is minted.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCandidate {
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    /// Raw option lines; kept verbatim while the operator is typing.
    pub options: Vec<String>,
}

impl FieldCandidate {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            label: String::new(),
            placeholder: None,
            required: false,
            options: Vec::new(),
        }
    }

    /// Trim options and drop blanks; `None` when nothing survives.
    fn cleaned_options(&self) -> Option<Vec<String>> {
        let cleaned: Vec<String> = self
            .options
            .iter()
            .map(|opt| opt.trim().to_string())
            .filter(|opt| !opt.is_empty())
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

/// Category a form is filed under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormCategory {
    #[default]
    General,
    Feedback,
    Complaints,
    Services,
    Employment,
    Surveys,
}

impl FormCategory {
    pub const ALL: [FormCategory; 6] = [
        Self::General,
        Self::Feedback,
        Self::Complaints,
        Self::Services,
        Self::Employment,
        Self::Surveys,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Feedback => "feedback and suggestions",
            Self::Complaints => "complaints",
            Self::Services => "service requests",
            Self::Employment => "employment",
            Self::Surveys => "surveys",
        }
    }
}

/// Form aggregate root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: FormCategory,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    // Events accumulated during mutations; drained by the host for
    // notification purposes.
    #[serde(skip)]
    events: Vec<FormEvent>,
}

impl FormDefinition {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_public: true,
            ..Self::default()
        }
    }

    /// Append a field built from `candidate`.
    ///
    /// Rejects a blank label; trims and drops empty option lines; mints a
    /// fresh unique id. Returns the id of the stored field.
    pub fn add_field(&mut self, candidate: &FieldCandidate) -> Result<FieldId, FormError> {
        if candidate.label.trim().is_empty() {
            return Err(FormError::LabelRequired);
        }

        let field = FieldDefinition {
            id: FieldId::generate(),
            field_type: candidate.field_type,
            label: candidate.label.clone(),
            placeholder: candidate
                .placeholder
                .as_ref()
                .filter(|p| !p.is_empty())
                .cloned(),
            required: candidate.required,
            options: candidate.cleaned_options(),
        };
        let id = field.id.clone();
        debug!(field = %id, label = %field.label, "field added");
        self.fields.push(field);
        self.raise(FormEvent::FieldAdded { id: id.clone() });
        Ok(id)
    }

    /// Remove the field with the given id. Removing an unknown id is a
    /// silent no-op; returns whether a field was removed.
    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| &field.id != id);
        let removed = self.fields.len() != before;
        if removed {
            debug!(field = %id, "field removed");
            self.raise(FormEvent::FieldRemoved { id: id.clone() });
        }
        removed
    }

    /// Clone the field with the given id, mint a new id, mark the label as a
    /// copy and append it. Returns the new field's id.
    pub fn duplicate_field(&mut self, id: &FieldId) -> Option<FieldId> {
        let source = self.fields.iter().find(|field| &field.id == id)?.clone();
        let copy = FieldDefinition {
            id: FieldId::generate(),
            label: format!("{} (copy)", source.label),
            ..source
        };
        let copy_id = copy.id.clone();
        self.fields.push(copy);
        self.raise(FormEvent::FieldDuplicated {
            source: id.clone(),
            copy: copy_id.clone(),
        });
        Some(copy_id)
    }

    /// Splice reorder: take the field at `from` and reinsert it at `to`.
    /// Relative order of all other fields is preserved. Out-of-range indices
    /// are a contract violation (drag indices are in range by construction).
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<(), FormError> {
        let len = self.fields.len();
        if from >= len || to >= len {
            return Err(FormError::IndexOutOfRange { from, to, len });
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        self.raise(FormEvent::FieldsReordered { from, to });
        Ok(())
    }

    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drain accumulated mutation events.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise(&mut self, event: FormEvent) {
        self.events.push(event);
    }
}

/// Errors from form aggregate mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field cannot be stored without a label.
    #[error("field label is required")]
    LabelRequired,

    /// Reorder indices must address existing positions.
    #[error("move indices out of range: {from} -> {to} with {len} fields")]
    IndexOutOfRange { from: usize, to: usize, len: usize },
}
