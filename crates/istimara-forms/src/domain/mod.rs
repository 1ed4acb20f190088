//! Domain layer: value objects, aggregates and events.

pub mod aggregates;
pub mod events;
pub mod value_objects;

pub use aggregates::{
    FieldCandidate, FieldDefinition, FieldType, FormCategory, FormDefinition, FormError,
};
pub use events::FormEvent;
pub use value_objects::{Email, EmailError, FieldId, Phone, PhoneError, ReferenceNumber};
