//! Domain Events
//!
//! Raised by the form aggregate during authoring so the embedding surface
//! (CLI, UI shell) can notify the operator about each mutation.

use crate::domain::value_objects::FieldId;

/// Events raised while a form definition is edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    FieldAdded { id: FieldId },
    FieldRemoved { id: FieldId },
    FieldDuplicated { source: FieldId, copy: FieldId },
    FieldsReordered { from: usize, to: usize },
}
