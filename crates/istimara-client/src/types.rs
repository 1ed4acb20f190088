//! Wire types
//!
//! Request and response shapes of the forms backend. Field layouts follow
//! the backend's snake_case contract; the engine's domain types serialize
//! straight into the `fields` arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use istimara_forms::export::ResponseRecord;
use istimara_forms::{FieldDefinition, FormCategory, FormDefinition};

/// Opaque bearer credential, injected into the transport at construction.
/// Never read from ambient storage, so tests can pass any fake value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    // The token itself never reaches logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Payload for creating a form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateFormRequest {
    pub title: String,
    pub description: String,
    pub category: FormCategory,
    pub is_public: bool,
    pub fields: Vec<FieldDefinition>,
}

impl From<&FormDefinition> for CreateFormRequest {
    fn from(form: &FormDefinition) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone(),
            category: form.category,
            is_public: form.is_public,
            fields: form.fields.clone(),
        }
    }
}

/// Form author, as returned by listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A stored form as listings return it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: FormCategory,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub responses_count: u64,
    #[serde(default)]
    pub created_by: Author,
    /// Full field list; present on detail fetches and public listings.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl FormSummary {
    /// Rebuild an engine definition for a collector session.
    pub fn definition(&self) -> FormDefinition {
        let mut form = FormDefinition::new(self.title.clone());
        form.description = self.description.clone();
        form.category = self.category;
        form.is_public = self.is_public;
        form.fields = self.fields.clone();
        form
    }
}

/// One stored response to a custom form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormResponse {
    pub id: u64,
    pub response_data: serde_json::Map<String, serde_json::Value>,
    pub submitter_name: String,
    #[serde(default)]
    pub submitter_email: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl FormResponse {
    /// View for export tabulation.
    pub fn record(&self) -> ResponseRecord {
        ResponseRecord {
            submitter_name: self.submitter_name.clone(),
            submitter_email: self.submitter_email.clone(),
            submitted_at: self.submitted_at,
            response_data: self.response_data.clone(),
        }
    }
}

/// Export formats the backend renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    /// Path segment in the export endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excel => "excel",
            Self::Pdf => "pdf",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Excel => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

/// Receipt for a fixed-form submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub reference_number: Option<String>,
}
