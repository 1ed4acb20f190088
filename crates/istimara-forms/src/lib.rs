//! Istimara Dynamic Form Engine
//!
//! Schema-driven forms for the government services registry: operators
//! assemble a form definition interactively, the definition is persisted
//! through the transport SDK, and respondents later fill it through a
//! collector session that renders controls, gathers answers and enforces
//! required-field completeness.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field/form aggregates, value objects, domain events
//! - **Builder**: interactive authoring with an explicit draft-field buffer
//! - **Session**: renderer/collector binding a definition to an answer map
//! - **Wizard**: step navigation for the fixed multi-step collectors
//! - **Intake**: the two structured long forms (entity registration,
//!   citizen feedback)
//! - **Export**: response tabulation for downloads and listings

pub mod builder;
pub mod domain;
pub mod export;
pub mod intake;
pub mod session;
pub mod wizard;

// Re-exports for convenience
pub use builder::{BuilderError, BuilderState, FormBuilder};
pub use domain::{
    Email, EmailError, FieldCandidate, FieldDefinition, FieldId, FieldType, FormCategory,
    FormDefinition, FormError, FormEvent, Phone, PhoneError, ReferenceNumber,
};
pub use export::{response_table, ExportTable, ResponseRecord};
pub use intake::{CitizenFeedback, EntityRegistration, IntakeError};
pub use session::{Answer, Control, FormSession, ResponseSubmission, SessionError, Submitter};
pub use wizard::Wizard;
