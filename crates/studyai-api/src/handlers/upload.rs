//! Upload proxy route.
//!
//! Accepts the browser's multipart form, re-encodes it field by field and posts it to
//! the upstream backend. The route validates nothing itself: type and size checks live
//! in the client components, and the backend is expected to validate independently.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use studyai_core::AppError;

/// What was forwarded, for logging.
#[derive(Debug, Default)]
struct FormSummary {
    fields: usize,
    files: usize,
    bytes: usize,
}

/// Re-encode every multipart field (name, filename, content type, bytes) into a new form.
async fn rebuild_form(mut multipart: Multipart) -> Result<(Form, FormSummary), AppError> {
    let mut form = Form::new();
    let mut summary = FormSummary::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedUpload(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());

        let data = field.bytes().await.map_err(|e| {
            AppError::MalformedUpload(format!("Failed to read field '{}': {}", name, e))
        })?;

        summary.fields += 1;
        summary.bytes += data.len();

        let mut part = Part::bytes(data.to_vec());
        if let Some(file_name) = file_name {
            summary.files += 1;
            part = part.file_name(file_name);
        }
        if let Some(content_type) = content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                AppError::MalformedUpload(format!(
                    "Invalid content type '{}' on field '{}': {}",
                    content_type, name, e
                ))
            })?;
        }

        form = form.part(name, part);
    }

    Ok((form, summary))
}

/// `POST /api/upload`
pub async fn proxy_upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        AppError::MalformedUpload(format!("Not a multipart request: {}", rejection.body_text()))
    })?;

    let (form, summary) = rebuild_form(multipart).await?;

    tracing::debug!(
        fields = summary.fields,
        files = summary.files,
        bytes = summary.bytes,
        upstream = %state.upstream.upload_url(),
        "Forwarding upload to backend"
    );

    let (status, body) = state.upstream.forward_upload(form).await?;

    tracing::info!(
        status = status.as_u16(),
        bytes = summary.bytes,
        "Upload processed by backend"
    );

    Ok((status, Json(body)).into_response())
}
