//! Client-side file validation.
//!
//! The messages are the exact inline texts shown next to the upload control. The proxy
//! never re-runs these checks.

use crate::constants::MAX_UPLOAD_SIZE_BYTES;
use crate::models::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload a PDF file")]
    NotPdf { content_type: String },

    #[error("File size exceeds {}MB limit", .max / (1024 * 1024))]
    FileTooLarge { size: u64, max: u64 },

    #[error("Please upload a PDF file or enter a URL")]
    NothingToGenerate,
}

/// MIME types "indicate PDF" when they mention it anywhere, e.g. `application/pdf`
/// or `application/x-pdf`.
pub fn is_pdf_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("pdf")
}

/// Validates dropped or picked files against the PDF type and size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileValidator {
    max_file_size: u64,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_SIZE_BYTES)
    }
}

impl FileValidator {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Type first, then size: a non-PDF is reported as such whatever its size.
    pub fn validate(&self, file: &SelectedFile) -> Result<(), ValidationError> {
        if !is_pdf_content_type(file.content_type()) {
            return Err(ValidationError::NotPdf {
                content_type: file.content_type().to_string(),
            });
        }

        if file.size() > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}
