//! Self-contained dropzone: drag state, the held file, the URL text and the
//! generate/progress state machine.
//!
//! `idle -> uploading -> {success, error} -> idle`. Success and error are shown for
//! [`RESULT_DISPLAY_WINDOW`] and then expire back to idle.

use std::time::Duration;
use studyai_core::constants::{PROGRESS_STEP, RESULT_DISPLAY_WINDOW};
use studyai_core::{FileValidator, GenerationState, SelectedFile, TransferProgress, ValidationError};
use tokio::time::Instant;

#[derive(Debug)]
pub struct Dropzone {
    validator: FileValidator,
    display_window: Duration,
    dragging: bool,
    file: Option<SelectedFile>,
    /// Value of the native file input; cleared on remove so the same file can be picked again.
    picker_value: Option<String>,
    url_text: String,
    state: GenerationState,
    progress: u8,
    error: Option<String>,
    shown_since: Option<Instant>,
}

impl Default for Dropzone {
    fn default() -> Self {
        Self::new(FileValidator::default())
    }
}

impl Dropzone {
    pub fn new(validator: FileValidator) -> Self {
        Self {
            validator,
            display_window: RESULT_DISPLAY_WINDOW,
            dragging: false,
            file: None,
            picker_value: None,
            url_text: String::new(),
            state: GenerationState::Idle,
            progress: 0,
            error: None,
            shown_since: None,
        }
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Keeps the drop target active; nothing changes.
    pub fn drag_over(&mut self) {}

    /// Only the first dropped file is considered. Returns whether it was stored.
    pub fn drop(&mut self, files: Vec<SelectedFile>) -> bool {
        self.dragging = false;
        match files.into_iter().next() {
            Some(file) => self.store_if_valid(file),
            None => false,
        }
    }

    /// A file chosen through the native picker.
    pub fn choose(&mut self, file: SelectedFile) -> bool {
        self.picker_value = Some(file.name().to_string());
        self.store_if_valid(file)
    }

    /// Clears any previous error, then records the validation failure, if any.
    pub fn validate_file(&mut self, file: &SelectedFile) -> bool {
        self.error = None;
        match self.validator.validate(file) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(file = %file.name(), error = %e, "File rejected");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    fn store_if_valid(&mut self, file: SelectedFile) -> bool {
        if !self.validate_file(&file) {
            return false;
        }
        self.file = Some(file);
        true
    }

    pub fn remove_file(&mut self) {
        self.file = None;
        self.picker_value = None;
    }

    pub fn set_url_text(&mut self, text: impl Into<String>) {
        self.url_text = text.into();
    }

    /// Start uploading, or report that there is nothing to generate from.
    ///
    /// Ignored while an upload is already running.
    pub fn generate(&mut self) -> Result<(), ValidationError> {
        if self.state.is_uploading() {
            return Ok(());
        }
        if self.file.is_none() && self.url_text.trim().is_empty() {
            let err = ValidationError::NothingToGenerate;
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.error = None;
        self.progress = 0;
        self.shown_since = None;
        self.state = GenerationState::Uploading;
        Ok(())
    }

    /// One simulation step: +5, clamped at 100. The tick after reaching 100 succeeds.
    pub fn tick(&mut self) -> u8 {
        if !self.state.is_uploading() {
            return self.progress;
        }
        if self.progress >= 100 {
            self.complete();
            return self.progress;
        }
        self.progress = self.progress.saturating_add(PROGRESS_STEP).min(100);
        self.progress
    }

    /// Real transfer progress. Never moves the bar backwards.
    pub fn record_transfer(&mut self, sent: u64, total: u64) {
        if !self.state.is_uploading() {
            return;
        }
        let percent = TransferProgress { sent, total }.percent();
        self.progress = self.progress.max(percent);
    }

    /// The upload finished successfully.
    pub fn complete(&mut self) {
        if self.state.is_uploading() {
            self.finish(GenerationState::Success);
        }
    }

    /// The upload failed. Ignored unless an upload is running.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.state.is_uploading() {
            return;
        }
        let message = message.into();
        self.error = Some(message.clone());
        self.finish(GenerationState::Error(message));
    }

    fn finish(&mut self, state: GenerationState) {
        self.state = state;
        self.progress = 0;
        self.shown_since = Some(Instant::now());
    }

    /// When the current success/error display ends, if one is showing.
    pub fn display_deadline(&self) -> Option<Instant> {
        match self.state {
            GenerationState::Success | GenerationState::Error(_) => {
                self.shown_since.map(|since| since + self.display_window)
            }
            _ => None,
        }
    }

    /// Return to idle once the display window has passed. Returns whether it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.display_deadline() {
            Some(deadline) if now >= deadline => {
                self.state = GenerationState::Idle;
                self.shown_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn url_text(&self) -> &str {
        &self.url_text
    }

    pub fn picker_value(&self) -> Option<&str> {
        self.picker_value.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        self.state.button_label()
    }
}
