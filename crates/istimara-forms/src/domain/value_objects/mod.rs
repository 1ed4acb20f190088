//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod email;
pub mod phone;

pub use email::{Email, EmailError};
pub use phone::{Phone, PhoneError};

use rand::Rng;

/// Identifier of a field within a form.
///
/// Minted once when the field is added and stable afterwards: a millisecond
/// timestamp plus a short random suffix, so ids never collide within one
/// authoring session and stay unique across sessions in practice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Mint a fresh field id.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: String = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("field_{}_{}", millis, &suffix[..9]))
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reference number attached to a fixed-form submission.
///
/// Ten uppercase alphanumeric characters, matching the registry's tracking
/// number format.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const LEN: usize = 10;

    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let value: String = (0..Self::LEN)
            .map(|_| Self::ALPHABET[rng.gen_range(0..Self::ALPHABET.len())] as char)
            .collect();
        Self(value)
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
