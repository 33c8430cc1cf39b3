//! Upload methods for the Study AI API client.

use crate::{ApiClient, ClientError};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use studyai_core::constants::{UPLOAD_FIELD_NAME, UPLOAD_ROUTE};
use studyai_core::{SelectedFile, TransferProgress, UploadReply};
use tokio::sync::mpsc::UnboundedSender;

/// Size of the body chunks streamed by [`ApiClient::upload_pdf_with_progress`].
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Read a local file into a [`SelectedFile`]. The MIME type is inferred from the extension.
pub async fn load_file(path: impl AsRef<Path>) -> Result<SelectedFile, ClientError> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.pdf")
        .to_string();

    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    let content_type = if is_pdf {
        "application/pdf"
    } else {
        "application/octet-stream"
    };

    Ok(SelectedFile::new(name, content_type, data))
}

fn file_part(part: Part, file: &SelectedFile) -> Result<Part, ClientError> {
    Ok(part
        .file_name(file.name().to_string())
        .mime_str(file.content_type())?)
}

impl ApiClient {
    /// Upload a file to the proxy as the `file` field of a multipart body.
    pub async fn upload_pdf(&self, file: &SelectedFile) -> Result<UploadReply, ClientError> {
        let part = file_part(Part::bytes(file.data().to_vec()), file)?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        tracing::debug!(file = %file.name(), size = file.size(), "Uploading file");
        self.post_multipart(UPLOAD_ROUTE, form).await
    }

    /// Like [`ApiClient::upload_pdf`], but streams the file in [`UPLOAD_CHUNK_SIZE`]
    /// chunks and reports each chunk handed to the transport on `progress`.
    ///
    /// A closed receiver does not cancel the upload.
    pub async fn upload_pdf_with_progress(
        &self,
        file: &SelectedFile,
        progress: UnboundedSender<TransferProgress>,
    ) -> Result<UploadReply, ClientError> {
        let data = file.data().clone();
        let total = data.len() as u64;

        let chunks: Vec<Bytes> = (0..data.len())
            .step_by(UPLOAD_CHUNK_SIZE)
            .map(|start| data.slice(start..(start + UPLOAD_CHUNK_SIZE).min(data.len())))
            .collect();

        let mut sent = 0u64;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            let _ = progress.send(TransferProgress { sent, total });
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        let body = reqwest::Body::wrap_stream(stream);
        let part = file_part(Part::stream_with_length(body, total), file)?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        tracing::debug!(
            file = %file.name(),
            size = total,
            chunks = total.div_ceil(UPLOAD_CHUNK_SIZE as u64),
            "Uploading file with progress"
        );
        self.post_multipart(UPLOAD_ROUTE, form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::sync::mpsc;

    async fn spawn_server(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(format!("http://{}/", addr)).unwrap()
    }

    async fn echo(mut multipart: Multipart) -> Json<Value> {
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
        Json(json!({ "fields": fields }))
    }

    fn echo_router() -> Router {
        Router::new().route(
            UPLOAD_ROUTE,
            post(echo).layer(axum::extract::DefaultBodyLimit::disable()),
        )
    }

    fn pdf(size: usize) -> SelectedFile {
        SelectedFile::new("notes.pdf", "application/pdf", vec![b'%'; size])
    }

    #[test]
    fn base_url_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.build_url(UPLOAD_ROUTE), "http://localhost:3000/api/upload");
    }

    #[tokio::test]
    async fn upload_sends_file_field() {
        let client = spawn_server(echo_router()).await;

        let reply = client.upload_pdf(&pdf(1234)).await.unwrap();

        let value = reply.into_value();
        assert_eq!(value["fields"][0]["name"], "file");
        assert_eq!(value["fields"][0]["file_name"], "notes.pdf");
        assert_eq!(value["fields"][0]["content_type"], "application/pdf");
        assert_eq!(value["fields"][0]["size"], 1234);
    }

    #[tokio::test]
    async fn upload_decodes_quiz_reply() {
        let router = Router::new().route(
            UPLOAD_ROUTE,
            post(|| async { Json(json!({ "quiz": [] })) }),
        );
        let client = spawn_server(router).await;

        let reply = client.upload_pdf(&pdf(10)).await.unwrap();

        assert!(reply.is_accepted());
        assert_eq!(reply.quiz().map(|q| q.len()), Some(0));
    }

    #[tokio::test]
    async fn upload_failure_carries_server_message() {
        let router = Router::new().route(
            UPLOAD_ROUTE,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to process upload" })),
                )
            }),
        );
        let client = spawn_server(router).await;

        let err = client.upload_pdf(&pdf(10)).await.unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert_eq!(err.server_message().as_deref(), Some("Failed to process upload"));
    }

    #[tokio::test]
    async fn post_multipart_decodes_into_typed_reply() {
        #[derive(serde::Deserialize)]
        struct Echo {
            fields: Vec<Value>,
        }

        let client = spawn_server(echo_router()).await;
        let form = Form::new().part(UPLOAD_FIELD_NAME, Part::bytes(vec![1u8, 2, 3]));

        let echo: Echo = client.post_multipart(UPLOAD_ROUTE, form).await.unwrap();

        assert_eq!(echo.fields.len(), 1);
        assert_eq!(echo.fields[0]["size"], 3);
    }

    #[tokio::test]
    async fn non_json_reply_is_decode_error() {
        let router = Router::new().route(UPLOAD_ROUTE, post(|| async { "done" }));
        let client = spawn_server(router).await;

        let err = client.upload_pdf(&pdf(10)).await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn progress_reports_every_chunk() {
        let client = spawn_server(echo_router()).await;
        let size = UPLOAD_CHUNK_SIZE * 2 + 100;
        let (tx, mut rx) = mpsc::unbounded_channel();

        let reply = client.upload_pdf_with_progress(&pdf(size), tx).await.unwrap();
        assert_eq!(reply.into_value()["fields"][0]["size"], size);

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].sent < w[1].sent));
        let last = events.last().unwrap();
        assert_eq!(last.sent, size as u64);
        assert_eq!(last.percent(), 100);
    }

    #[tokio::test]
    async fn load_file_infers_pdf_type() {
        let dir = std::env::temp_dir().join(format!("studyai-client-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let pdf_path = dir.join("Slides.PDF");
        let txt_path = dir.join("notes.txt");
        tokio::fs::write(&pdf_path, b"%PDF-1.4").await.unwrap();
        tokio::fs::write(&txt_path, b"hello").await.unwrap();

        let pdf = load_file(&pdf_path).await.unwrap();
        assert_eq!(pdf.name(), "Slides.PDF");
        assert_eq!(pdf.content_type(), "application/pdf");
        assert_eq!(pdf.size(), 8);

        let txt = load_file(&txt_path).await.unwrap();
        assert_eq!(txt.content_type(), "application/octet-stream");

        let missing = load_file(dir.join("missing.pdf")).await.unwrap_err();
        assert!(matches!(missing, ClientError::Io { .. }));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
