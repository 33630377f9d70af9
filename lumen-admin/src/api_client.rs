//! REST client for the LUMEN API.

use std::time::Duration;

use lumen_api::error::ApiError as ApiServerError;
use lumen_api::types::{
    ListInquiriesResponse, ListProjectsResponse, ListTestimonialsResponse, SyncResponse,
    MAX_LIST_LIMIT,
};
use lumen_core::{
    Inquiry, InquiryId, InquiryUpdate, Project, ProjectId, ProjectUpdate, Testimonial,
    TestimonialId, TestimonialUpdate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AdminConfig;
use crate::table::ActionError;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<ApiClientError> for ActionError {
    fn from(err: ApiClientError) -> Self {
        ActionError::new(err.to_string())
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &AdminConfig) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiClientError> {
        let response = self
            .client
            .get(self.url("/projects"))
            .query(&[("limit", MAX_LIST_LIMIT)])
            .send()
            .await?;
        let list: ListProjectsResponse = self.parse_response(response).await?;
        Ok(list.projects)
    }

    pub async fn update_project(
        &self,
        id: &ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, ApiClientError> {
        self.patch_json(&format!("/projects/{}", id), update).await
    }

    pub async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiClientError> {
        self.delete(&format!("/projects/{}", id)).await
    }

    pub async fn sync_portfolio(&self) -> Result<SyncResponse, ApiClientError> {
        let response = self.client.post(self.url("/portfolio/sync")).send().await?;
        self.parse_response(response).await
    }

    // ------------------------------------------------------------------------
    // Testimonials
    // ------------------------------------------------------------------------

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, ApiClientError> {
        let response = self.client.get(self.url("/testimonials")).send().await?;
        let list: ListTestimonialsResponse = self.parse_response(response).await?;
        Ok(list.testimonials)
    }

    pub async fn update_testimonial(
        &self,
        id: &TestimonialId,
        update: &TestimonialUpdate,
    ) -> Result<Testimonial, ApiClientError> {
        self.patch_json(&format!("/testimonials/{}", id), update).await
    }

    pub async fn delete_testimonial(&self, id: &TestimonialId) -> Result<(), ApiClientError> {
        self.delete(&format!("/testimonials/{}", id)).await
    }

    // ------------------------------------------------------------------------
    // Inquiries
    // ------------------------------------------------------------------------

    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>, ApiClientError> {
        let response = self.client.get(self.url("/inquiries")).send().await?;
        let list: ListInquiriesResponse = self.parse_response(response).await?;
        Ok(list.inquiries)
    }

    pub async fn update_inquiry(
        &self,
        id: &InquiryId,
        update: &InquiryUpdate,
    ) -> Result<Inquiry, ApiClientError> {
        self.patch_json(&format!("/inquiries/{}", id), update).await
    }

    pub async fn delete_inquiry(&self, id: &InquiryId) -> Result<(), ApiClientError> {
        self.delete(&format!("/inquiries/{}", id)).await
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        self.parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        let response = self.client.delete(self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await?;
        Err(error_from_body(status.as_u16(), &text))
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let text = response.text().await?;
            Err(error_from_body(status.as_u16(), &text))
        }
    }
}

fn error_from_body(status: u16, text: &str) -> ApiClientError {
    if let Ok(api_error) = serde_json::from_str::<ApiServerError>(text) {
        return ApiClientError::InvalidResponse(format!(
            "{}: {}",
            api_error.code, api_error.message
        ));
    }
    ApiClientError::InvalidResponse(format!("HTTP {}: {}", status, text))
}
