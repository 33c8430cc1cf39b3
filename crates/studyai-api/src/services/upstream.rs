//! Client for the upstream quiz-generation backend.

use anyhow::Context;
use axum::http::StatusCode;
use reqwest::multipart::Form;
use std::time::Duration;
use studyai_core::AppError;

/// Posts re-encoded upload forms to the backend's upload endpoint.
///
/// Holds no per-request state; concurrent uploads are forwarded independently.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: reqwest::Client,
    upload_url: String,
}

impl UpstreamClient {
    pub fn new(upload_url: impl Into<String>, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create upstream HTTP client")?;

        Ok(Self {
            client,
            upload_url: upload_url.into(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Forward a multipart form and return the backend's status and JSON body.
    ///
    /// Non-2xx statuses, transport failures and non-JSON bodies are all errors.
    pub async fn forward_upload(
        &self,
        form: Form,
    ) -> Result<(StatusCode, serde_json::Value), AppError> {
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AppError::UpstreamBody(e.to_string()))?;

        let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK);
        Ok((status, body))
    }
}
