//! HTTP implementation of the forms API
//!
//! Thin reqwest client speaking the backend's REST contract. The bearer
//! credential is injected at construction; requests without one are sent
//! anonymously (public listing and response submission allow it).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use istimara_forms::intake::feedback::FeedbackPayload;
use istimara_forms::{EntityRegistration, ResponseSubmission};

use crate::api::FormsApi;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    CreateFormRequest, Credential, ExportFormat, FormResponse, FormSummary, SubmissionReceipt,
};

/// Client for the forms backend.
pub struct HttpFormsApi {
    base_url: String,
    credential: Option<Credential>,
    client: reqwest::Client,
}

impl HttpFormsApi {
    pub fn new(base_url: impl Into<String>, credential: Option<Credential>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credential,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credential {
            Some(credential) => request.header("Authorization", credential.bearer_header()),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "request failed");
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.client.get(self.url(path))).await?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl FormsApi for HttpFormsApi {
    async fn create_form(&self, request: &CreateFormRequest) -> ApiResult<FormSummary> {
        debug!(title = %request.title, "creating form");
        self.post_json("/api/forms/create/", request).await
    }

    async fn list_public_forms(&self) -> ApiResult<Vec<FormSummary>> {
        self.get_json("/api/forms/public/").await
    }

    async fn list_managed_forms(&self) -> ApiResult<Vec<FormSummary>> {
        self.get_json("/api/forms/manage/").await
    }

    async fn set_form_active(&self, form_id: u64, is_active: bool) -> ApiResult<FormSummary> {
        let body = serde_json::json!({ "is_active": is_active });
        let response = self
            .send(
                self.client
                    .patch(self.url(&format!("/api/forms/manage/{}/", form_id)))
                    .json(&body),
            )
            .await?;
        decode(response).await
    }

    async fn delete_form(&self, form_id: u64) -> ApiResult<()> {
        self.send(
            self.client
                .delete(self.url(&format!("/api/forms/manage/{}/", form_id))),
        )
        .await?;
        Ok(())
    }

    async fn duplicate_form(&self, form_id: u64) -> ApiResult<FormSummary> {
        let response = self
            .send(
                self.client
                    .post(self.url(&format!("/api/forms/duplicate/{}/", form_id))),
            )
            .await?;
        decode(response).await
    }

    async fn submit_response(&self, submission: &ResponseSubmission) -> ApiResult<()> {
        debug!(form_id = submission.form_id, "submitting response");
        self.send(
            self.client
                .post(self.url("/api/forms/submit/"))
                .json(submission),
        )
        .await?;
        Ok(())
    }

    async fn list_responses(&self, form_id: u64) -> ApiResult<Vec<FormResponse>> {
        self.get_json(&format!("/api/forms/responses/{}/", form_id))
            .await
    }

    async fn export_responses(&self, form_id: u64, format: ExportFormat) -> ApiResult<Vec<u8>> {
        let response = self
            .send(self.client.get(self.url(&format!(
                "/api/forms/export/{}/{}/",
                form_id,
                format.as_str()
            ))))
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn submit_entity_registration(
        &self,
        registration: &EntityRegistration,
    ) -> ApiResult<SubmissionReceipt> {
        debug!(entity = %registration.entity_name, "submitting entity registration");
        self.post_json("/api/forms/government-entities/", registration)
            .await
    }

    async fn submit_citizen_feedback(
        &self,
        payload: &FeedbackPayload,
    ) -> ApiResult<SubmissionReceipt> {
        debug!(subject = %payload.title, "submitting citizen feedback");
        self.post_json("/api/forms/citizen-feedback/", payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpFormsApi::new("https://api.example.gov/", None);
        assert_eq!(
            api.url("/api/forms/public/"),
            "https://api.example.gov/api/forms/public/"
        );
    }
}
