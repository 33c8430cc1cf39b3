//! The seam between the home page and whatever performs the upload.

use async_trait::async_trait;
use studyai_api_client::{ApiClient, ClientError};
use studyai_core::{SelectedFile, TransferProgress, UploadReply};
use tokio::sync::mpsc::UnboundedSender;

#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Upload `file` to the proxy. When `progress` is given, byte counts are reported on it.
    async fn upload(
        &self,
        file: &SelectedFile,
        progress: Option<UnboundedSender<TransferProgress>>,
    ) -> Result<UploadReply, ClientError>;
}

#[async_trait]
impl QuizBackend for ApiClient {
    async fn upload(
        &self,
        file: &SelectedFile,
        progress: Option<UnboundedSender<TransferProgress>>,
    ) -> Result<UploadReply, ClientError> {
        match progress {
            Some(tx) => self.upload_pdf_with_progress(file, tx).await,
            None => self.upload_pdf(file).await,
        }
    }
}
