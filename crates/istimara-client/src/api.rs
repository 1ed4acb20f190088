//! Forms API port
//!
//! The transport interface the engine's surfaces program against. Each call
//! is a single in-flight request: no retries, no queuing, and list refreshes
//! after a mutation are sequenced strictly after the mutating call resolves.

use async_trait::async_trait;

use istimara_forms::intake::feedback::FeedbackPayload;
use istimara_forms::{EntityRegistration, ResponseSubmission};

use crate::error::ApiResult;
use crate::types::{
    CreateFormRequest, ExportFormat, FormResponse, FormSummary, SubmissionReceipt,
};

/// Operations the forms backend exposes.
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// Persist a new form definition.
    async fn create_form(&self, request: &CreateFormRequest) -> ApiResult<FormSummary>;

    /// Forms visible to everyone (public and active).
    async fn list_public_forms(&self) -> ApiResult<Vec<FormSummary>>;

    /// Forms owned by the authenticated operator.
    async fn list_managed_forms(&self) -> ApiResult<Vec<FormSummary>>;

    /// Toggle whether a form accepts responses.
    async fn set_form_active(&self, form_id: u64, is_active: bool) -> ApiResult<FormSummary>;

    /// Delete a form and its responses.
    async fn delete_form(&self, form_id: u64) -> ApiResult<()>;

    /// Server-side copy; the copy's title is suffixed and it starts inactive.
    async fn duplicate_form(&self, form_id: u64) -> ApiResult<FormSummary>;

    /// Submit a respondent's answers to a custom form.
    async fn submit_response(&self, submission: &ResponseSubmission) -> ApiResult<()>;

    /// Responses collected for one form.
    async fn list_responses(&self, form_id: u64) -> ApiResult<Vec<FormResponse>>;

    /// Rendered export of a form's responses, consumed as an opaque blob.
    async fn export_responses(&self, form_id: u64, format: ExportFormat) -> ApiResult<Vec<u8>>;

    /// Submit a government-entity registration.
    async fn submit_entity_registration(
        &self,
        registration: &EntityRegistration,
    ) -> ApiResult<SubmissionReceipt>;

    /// Submit a citizen feedback message.
    async fn submit_citizen_feedback(
        &self,
        payload: &FeedbackPayload,
    ) -> ApiResult<SubmissionReceipt>;
}
