//! In-memory implementation of the forms API
//!
//! Backs tests and offline demos. Mirrors the server's observable behavior:
//! sequential ids, duplicate copies arriving suffixed and inactive, response
//! counting, and a JSON export body.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use istimara_forms::intake::feedback::FeedbackPayload;
use istimara_forms::{EntityRegistration, ReferenceNumber, ResponseSubmission};

use crate::api::FormsApi;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    Author, CreateFormRequest, ExportFormat, FormResponse, FormSummary, SubmissionReceipt,
};

/// DashMap-backed stand-in for the backend.
#[derive(Default)]
pub struct InMemoryFormsApi {
    forms: DashMap<u64, FormSummary>,
    responses: DashMap<u64, Vec<FormResponse>>,
    registrations: DashMap<String, EntityRegistration>,
    feedback: DashMap<String, FeedbackPayload>,
    next_form_id: AtomicU64,
    next_response_id: AtomicU64,
}

impl InMemoryFormsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of forms ever created (save-call accounting in tests).
    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    /// Fixed-form submissions received, by reference number.
    pub fn registration_references(&self) -> Vec<String> {
        self.registrations
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn feedback_references(&self) -> Vec<String> {
        self.feedback.iter().map(|entry| entry.key().clone()).collect()
    }

    fn form_or_not_found(&self, form_id: u64) -> ApiResult<FormSummary> {
        self.forms
            .get(&form_id)
            .map(|entry| entry.clone())
            .ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl FormsApi for InMemoryFormsApi {
    async fn create_form(&self, request: &CreateFormRequest) -> ApiResult<FormSummary> {
        let id = self.next_form_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let summary = FormSummary {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            category: request.category,
            is_public: request.is_public,
            is_active: true,
            created_at: now,
            updated_at: now,
            responses_count: 0,
            created_by: Author::default(),
            fields: request.fields.clone(),
        };
        self.forms.insert(id, summary.clone());
        Ok(summary)
    }

    async fn list_public_forms(&self) -> ApiResult<Vec<FormSummary>> {
        let mut forms: Vec<FormSummary> = self
            .forms
            .iter()
            .filter(|entry| entry.is_public && entry.is_active)
            .map(|entry| entry.clone())
            .collect();
        forms.sort_by_key(|form| form.id);
        Ok(forms)
    }

    async fn list_managed_forms(&self) -> ApiResult<Vec<FormSummary>> {
        let mut forms: Vec<FormSummary> =
            self.forms.iter().map(|entry| entry.clone()).collect();
        forms.sort_by_key(|form| form.id);
        Ok(forms)
    }

    async fn set_form_active(&self, form_id: u64, is_active: bool) -> ApiResult<FormSummary> {
        let mut entry = self.forms.get_mut(&form_id).ok_or(ApiError::NotFound)?;
        entry.is_active = is_active;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete_form(&self, form_id: u64) -> ApiResult<()> {
        self.forms.remove(&form_id).ok_or(ApiError::NotFound)?;
        self.responses.remove(&form_id);
        Ok(())
    }

    async fn duplicate_form(&self, form_id: u64) -> ApiResult<FormSummary> {
        let source = self.form_or_not_found(form_id)?;
        let id = self.next_form_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let copy = FormSummary {
            id,
            title: format!("{} (copy)", source.title),
            is_active: false,
            created_at: now,
            updated_at: now,
            responses_count: 0,
            ..source
        };
        self.forms.insert(id, copy.clone());
        Ok(copy)
    }

    async fn submit_response(&self, submission: &ResponseSubmission) -> ApiResult<()> {
        let mut form = self
            .forms
            .get_mut(&submission.form_id)
            .ok_or(ApiError::NotFound)?;
        let id = self.next_response_id.fetch_add(1, Ordering::SeqCst) + 1;
        let response = FormResponse {
            id,
            response_data: submission.response_data.clone(),
            submitter_name: submission.submitter_name.clone(),
            submitter_email: if submission.submitter_email.is_empty() {
                None
            } else {
                Some(submission.submitter_email.clone())
            },
            submitted_at: Utc::now(),
        };
        self.responses
            .entry(submission.form_id)
            .or_default()
            .push(response);
        form.responses_count += 1;
        Ok(())
    }

    async fn list_responses(&self, form_id: u64) -> ApiResult<Vec<FormResponse>> {
        self.form_or_not_found(form_id)?;
        Ok(self
            .responses
            .get(&form_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn export_responses(&self, form_id: u64, _format: ExportFormat) -> ApiResult<Vec<u8>> {
        let form = self.form_or_not_found(form_id)?;
        let responses = self.list_responses(form_id).await?;
        let body = serde_json::json!({
            "form_title": form.title,
            "responses": responses,
        });
        serde_json::to_vec_pretty(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn submit_entity_registration(
        &self,
        registration: &EntityRegistration,
    ) -> ApiResult<SubmissionReceipt> {
        let reference = ReferenceNumber::generate();
        self.registrations
            .insert(reference.as_str().to_string(), registration.clone());
        Ok(SubmissionReceipt {
            reference_number: Some(reference.as_str().to_string()),
        })
    }

    async fn submit_citizen_feedback(
        &self,
        payload: &FeedbackPayload,
    ) -> ApiResult<SubmissionReceipt> {
        let reference = ReferenceNumber::generate();
        self.feedback
            .insert(reference.as_str().to_string(), payload.clone());
        Ok(SubmissionReceipt {
            reference_number: Some(reference.as_str().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use istimara_forms::{FieldCandidate, FieldType, FormDefinition};

    fn sample_request(title: &str, is_public: bool) -> CreateFormRequest {
        let mut form = FormDefinition::new(title);
        form.is_public = is_public;
        let mut field = FieldCandidate::new(FieldType::Text);
        field.label = "Name".into();
        form.add_field(&field).unwrap();
        CreateFormRequest::from(&form)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let api = InMemoryFormsApi::new();
        api.create_form(&sample_request("Public", true)).await.unwrap();
        api.create_form(&sample_request("Private", false)).await.unwrap();

        assert_eq!(api.list_managed_forms().await.unwrap().len(), 2);
        let public = api.list_public_forms().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].title, "Public");
    }

    #[tokio::test]
    async fn test_deactivated_form_leaves_public_listing() {
        let api = InMemoryFormsApi::new();
        let form = api.create_form(&sample_request("Survey", true)).await.unwrap();
        api.set_form_active(form.id, false).await.unwrap();
        assert!(api.list_public_forms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_semantics() {
        let api = InMemoryFormsApi::new();
        let form = api.create_form(&sample_request("Survey", true)).await.unwrap();
        let copy = api.duplicate_form(form.id).await.unwrap();
        assert_eq!(copy.title, "Survey (copy)");
        assert!(!copy.is_active);
        assert_eq!(copy.responses_count, 0);
        assert_ne!(copy.id, form.id);
    }

    #[tokio::test]
    async fn test_delete_unknown_form() {
        let api = InMemoryFormsApi::new();
        assert!(matches!(api.delete_form(99).await, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_submission_increments_count() {
        let api = InMemoryFormsApi::new();
        let form = api.create_form(&sample_request("Survey", true)).await.unwrap();

        let submission = ResponseSubmission {
            form_id: form.id,
            response_data: serde_json::Map::new(),
            submitter_name: "Ali".into(),
            submitter_email: String::new(),
        };
        api.submit_response(&submission).await.unwrap();

        let stored = api.list_managed_forms().await.unwrap();
        assert_eq!(stored[0].responses_count, 1);
        let responses = api.list_responses(form.id).await.unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].submitter_email, None);
    }

    #[tokio::test]
    async fn test_export_contains_title_and_responses() {
        let api = InMemoryFormsApi::new();
        let form = api.create_form(&sample_request("Survey", true)).await.unwrap();
        let blob = api.export_responses(form.id, ExportFormat::Excel).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(json["form_title"], "Survey");
        assert!(json["responses"].as_array().unwrap().is_empty());
    }
}
