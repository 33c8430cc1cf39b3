use axum::{
    extract::Multipart,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use std::time::Duration;

/// Smallest byte sequence that still looks like a PDF.
pub fn minimal_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n"
        .to_vec()
}

/// Multipart form with a single `file` field, as the browser page sends it.
pub fn pdf_form(file_name: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name(file_name.to_string())
        .mime_type("application/pdf");
    MultipartForm::new().add_part("file", part)
}

/// Upstream that always answers `status` with `body`.
pub fn fixed_upstream(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/upload",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

/// Upstream answering 200 with a non-JSON body.
pub fn plain_text_upstream() -> Router {
    Router::new().route("/upload", post(|| async { "quiz generated" }))
}

/// Upstream that takes longer than any test timeout to answer.
pub fn slow_upstream(delay: Duration) -> Router {
    Router::new().route(
        "/upload",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({ "quiz": [] }))
        }),
    )
}

/// Upstream that describes every field it received.
pub fn echo_upstream() -> Router {
    async fn echo(mut multipart: Multipart) -> impl IntoResponse {
        let mut fields = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().map(|s| s.to_string());
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());
            let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            fields.push(json!({
                "name": name,
                "file_name": file_name,
                "content_type": content_type,
                "size": size,
            }));
        }
        (StatusCode::OK, Json(json!({ "fields": fields })))
    }

    Router::new().route("/upload", post(echo))
}
