//! Home page controller.
//!
//! Owns the page-level loading flag and turns a selected file into the real upload
//! request. URL generation has no backend contract yet and is reported as unavailable
//! without issuing any request.

use crate::backend::QuizBackend;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use studyai_api_client::ClientError;
use studyai_core::constants::RESULT_DISPLAY_WINDOW;
use studyai_core::{FileValidator, GenerationState, SelectedFile, TransferProgress, UploadReply, ValidationError};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HomeError {
    /// Non-success status, transport failure or an error reply. `cause` is for logs only.
    #[error("Upload failed")]
    UploadFailed { status: Option<u16>, cause: String },

    #[error("URL-based generation is not available yet")]
    UrlGenerationUnavailable { url: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl HomeError {
    fn from_client(err: &ClientError) -> Self {
        let status = match err {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        };
        let cause = err
            .server_message()
            .unwrap_or_else(|| err.to_string());
        HomeError::UploadFailed { status, cause }
    }
}

type Outcome = Result<UploadReply, HomeError>;

/// Page status plus when the current success/error display started.
#[derive(Debug, Default)]
struct StatusSlot {
    state: GenerationState,
    shown_since: Option<Instant>,
}

impl StatusSlot {
    fn deadline(&self, window: Duration) -> Option<Instant> {
        match self.state {
            GenerationState::Success | GenerationState::Error(_) => {
                self.shown_since.map(|since| since + window)
            }
            _ => None,
        }
    }
}

/// Decrements the in-flight count on every exit path.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn new(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct HomePage<B> {
    backend: B,
    validator: FileValidator,
    in_flight: AtomicUsize,
    display_window: Duration,
    status: Mutex<StatusSlot>,
    last_outcome: Mutex<Option<Outcome>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<B: QuizBackend> HomePage<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            validator: FileValidator::default(),
            in_flight: AtomicUsize::new(0),
            display_window: RESULT_DISPLAY_WINDOW,
            status: Mutex::new(StatusSlot::default()),
            last_outcome: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True while any request is outstanding. Overlapping requests are not de-duplicated.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Current status. Success and error fall back to idle once their display window ends.
    pub fn status(&self) -> GenerationState {
        self.expire(Instant::now());
        lock(&self.status).state.clone()
    }

    /// When the current success/error display ends, if one is showing.
    pub fn display_deadline(&self) -> Option<Instant> {
        lock(&self.status).deadline(self.display_window)
    }

    /// Return to idle once the display window has passed. Returns whether it did.
    pub fn expire(&self, now: Instant) -> bool {
        let mut slot = lock(&self.status);
        match slot.deadline(self.display_window) {
            Some(deadline) if now >= deadline => {
                *slot = StatusSlot::default();
                true
            }
            _ => false,
        }
    }

    fn set_status(&self, state: GenerationState) {
        let shown_since = match state {
            GenerationState::Success | GenerationState::Error(_) => Some(Instant::now()),
            _ => None,
        };
        *lock(&self.status) = StatusSlot { state, shown_since };
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        lock(&self.last_outcome).clone()
    }

    fn record(&self, outcome: &Outcome) {
        self.set_status(match outcome {
            Ok(_) => GenerationState::Success,
            Err(e) => GenerationState::Error(e.to_string()),
        });
        *lock(&self.last_outcome) = Some(outcome.clone());
    }

    pub async fn handle_file_select(&self, file: SelectedFile) -> Outcome {
        self.upload(file, None).await
    }

    /// Same as [`HomePage::handle_file_select`], reporting transfer progress on `progress`.
    pub async fn handle_file_select_with_progress(
        &self,
        file: SelectedFile,
        progress: UnboundedSender<TransferProgress>,
    ) -> Outcome {
        self.upload(file, Some(progress)).await
    }

    async fn upload(
        &self,
        file: SelectedFile,
        progress: Option<UnboundedSender<TransferProgress>>,
    ) -> Outcome {
        let _loading = LoadingGuard::new(&self.in_flight);
        self.set_status(GenerationState::Uploading);

        let outcome = self.send(&file, progress).await;
        match &outcome {
            Ok(reply) => tracing::info!(
                file = %file.name(),
                reply = %reply.clone().into_value(),
                "Upload complete"
            ),
            Err(e) => tracing::error!(file = %file.name(), error = ?e, "Upload failed"),
        }

        self.record(&outcome);
        outcome
    }

    async fn send(
        &self,
        file: &SelectedFile,
        progress: Option<UnboundedSender<TransferProgress>>,
    ) -> Outcome {
        self.validator.validate(file)?;

        let reply = self
            .backend
            .upload(file, progress)
            .await
            .map_err(|e| HomeError::from_client(&e))?;

        // A 2xx carrying the proxy's own failure shape is still a failure.
        if let Some(message) = reply.error_message() {
            return Err(HomeError::UploadFailed {
                status: None,
                cause: message.to_string(),
            });
        }

        Ok(reply)
    }

    /// No request is issued: there is no backend contract for URLs yet.
    pub async fn handle_url_generate(&self, url: &str) -> Outcome {
        let _loading = LoadingGuard::new(&self.in_flight);

        let url = url.trim();
        let outcome = if url.is_empty() {
            Err(HomeError::Validation(ValidationError::NothingToGenerate))
        } else {
            tracing::warn!(url = %url, "URL-based generation requested but not available");
            Err(HomeError::UrlGenerationUnavailable {
                url: url.to_string(),
            })
        };

        self.record(&outcome);
        outcome
    }
}

impl<B: QuizBackend + 'static> HomePage<B> {
    /// Run the upload on the runtime; the handle yields the result.
    pub fn spawn_file_select(self: &Arc<Self>, file: SelectedFile) -> JoinHandle<Outcome> {
        let page = Arc::clone(self);
        tokio::spawn(async move { page.handle_file_select(file).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;

    struct CallRecorder(AtomicBool);

    #[async_trait]
    impl QuizBackend for CallRecorder {
        async fn upload(
            &self,
            _file: &SelectedFile,
            _progress: Option<UnboundedSender<TransferProgress>>,
        ) -> Result<UploadReply, ClientError> {
            self.0.store(true, Ordering::SeqCst);
            Ok(UploadReply::Accepted(serde_json::json!({})))
        }
    }

    #[tokio::test]
    async fn url_generation_issues_no_request() {
        let page = HomePage::new(CallRecorder(AtomicBool::new(false)));

        let err = page.handle_url_generate(" https://example.com ").await.unwrap_err();

        assert_eq!(
            err,
            HomeError::UrlGenerationUnavailable {
                url: "https://example.com".into()
            }
        );
        assert_eq!(err.to_string(), "URL-based generation is not available yet");
        assert!(!page.backend().0.load(Ordering::SeqCst));
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn blank_url_is_a_validation_error() {
        let page = HomePage::new(CallRecorder(AtomicBool::new(false)));

        let err = page.handle_url_generate("   ").await.unwrap_err();

        assert_eq!(err.to_string(), "Please upload a PDF file or enter a URL");
        assert!(matches!(page.status(), GenerationState::Error(_)));
    }

    #[tokio::test]
    async fn invalid_file_is_rejected_before_upload() {
        let page = HomePage::new(CallRecorder(AtomicBool::new(false)));
        let file = SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec());

        let err = page.handle_file_select(file).await.unwrap_err();

        assert_eq!(err.to_string(), "Please upload a PDF file");
        assert!(!page.backend().0.load(Ordering::SeqCst));
        assert!(!page.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn result_status_returns_to_idle_after_display_window() {
        let page = HomePage::new(CallRecorder(AtomicBool::new(false)));
        let file = SelectedFile::new("notes.pdf", "application/pdf", b"%PDF".to_vec());

        page.handle_file_select(file).await.unwrap();
        assert_eq!(page.status(), GenerationState::Success);
        let deadline = page.display_deadline().unwrap();

        tokio::time::advance(RESULT_DISPLAY_WINDOW - Duration::from_millis(1)).await;
        assert_eq!(page.status(), GenerationState::Success);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(page.status(), GenerationState::Idle);
        assert!(page.display_deadline().is_none());
        assert!(!page.expire(deadline));
        assert!(matches!(page.last_outcome(), Some(Ok(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn error_status_expires_too() {
        let page = HomePage::new(CallRecorder(AtomicBool::new(false)));

        page.handle_url_generate("https://example.com").await.unwrap_err();
        assert!(matches!(page.status(), GenerationState::Error(_)));

        let deadline = page.display_deadline().unwrap();
        assert!(page.expire(deadline));
        assert_eq!(page.status(), GenerationState::Idle);
    }

    #[test]
    fn client_status_error_keeps_server_message_as_cause() {
        let err = ClientError::Status {
            status: 500,
            body: r#"{"error":"Failed to process upload"}"#.to_string(),
        };

        assert_eq!(
            HomeError::from_client(&err),
            HomeError::UploadFailed {
                status: Some(500),
                cause: "Failed to process upload".into()
            }
        );
    }
}
