//! URL-based generation.
//!
//! The backend has no contract for generating from a URL, so this route answers 501
//! instead of pretending to succeed.

use crate::error::{HttpAppError, ValidatedJson};
use serde::Deserialize;
use studyai_core::constants::URL_GENERATION_UNAVAILABLE;
use studyai_core::AppError;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
}

/// `POST /api/generate`
pub async fn generate_from_url(ValidatedJson(request): ValidatedJson<GenerateRequest>) -> HttpAppError {
    let url = request.url.trim();
    if url.is_empty() {
        return AppError::InvalidInput("url must not be empty".to_string()).into();
    }

    tracing::warn!(url = %url, "URL-based generation requested");
    AppError::NotImplemented(URL_GENERATION_UNAVAILABLE.to_string()).into()
}
