//! Aggregates module
//!
//! Consistency boundaries with encapsulated mutation logic.

pub mod form;

pub use form::{
    FieldCandidate, FieldDefinition, FieldType, FormCategory, FormDefinition, FormError,
};
