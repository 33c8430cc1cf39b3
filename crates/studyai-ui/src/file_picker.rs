//! Callback file picker: hands one accepted file to its parent.

use studyai_core::{FileValidator, SelectedFile, ValidationError};

/// Filters by PDF MIME type and size ceiling, then calls `on_file_select`.
///
/// Exactly one file per interaction: extra files in a multi-file drop are ignored.
/// Rejected files never reach the callback.
pub struct FilePicker<F> {
    validator: FileValidator,
    on_file_select: F,
    last_rejection: Option<ValidationError>,
}

impl<F> FilePicker<F>
where
    F: FnMut(SelectedFile),
{
    pub fn new(on_file_select: F) -> Self {
        Self::with_validator(FileValidator::default(), on_file_select)
    }

    pub fn with_validator(validator: FileValidator, on_file_select: F) -> Self {
        Self {
            validator,
            on_file_select,
            last_rejection: None,
        }
    }

    pub fn accept(&mut self, files: Vec<SelectedFile>) -> Option<SelectedFile> {
        self.last_rejection = None;

        let extra = files.len().saturating_sub(1);
        let file = files.into_iter().next()?;
        if extra > 0 {
            tracing::debug!(ignored = extra, "Multiple files dropped, keeping the first");
        }

        if let Err(e) = self.validator.validate(&file) {
            tracing::debug!(file = %file.name(), error = %e, "File rejected by picker");
            self.last_rejection = Some(e);
            return None;
        }

        (self.on_file_select)(file.clone());
        Some(file)
    }

    /// Why the most recent interaction selected nothing, if a file was rejected.
    pub fn last_rejection(&self) -> Option<&ValidationError> {
        self.last_rejection.as_ref()
    }
}
