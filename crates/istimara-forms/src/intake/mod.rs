//! Fixed long-form collectors
//!
//! The two structured intake forms with a known field set: government-entity
//! registration (seven steps) and citizen feedback (four steps). Both embed
//! the step [`Wizard`](crate::wizard::Wizard) and validate the whole form at
//! submission time only.

pub mod entity;
pub mod feedback;

pub use entity::{EntityRegistration, EntityType, Governorate};
pub use feedback::{
    CitizenFeedback, ContactMethod, EducationLevel, FeedbackPayload, FeedbackStatus,
    FeedbackType, Gender, Priority,
};

use thiserror::Error;

/// Validation failures for the fixed collectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// A required field is missing or empty.
    #[error("field \"{0}\" is required")]
    Missing(&'static str),

    /// A field has a value but it does not parse.
    #[error("field \"{field}\" is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Data-processing consent is mandatory.
    #[error("consent to data processing is required")]
    ConsentRequired,
}
