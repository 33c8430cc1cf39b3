use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A file the user dropped or picked, held in memory until it is uploaded or removed.
///
/// `size` is the size the browser (or file system) declared; it normally equals the
/// length of `data` but is tracked separately so validation never has to read content.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    size: u64,
    data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// Override the declared size.
    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size in MiB with two decimals, as shown next to the file name.
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size as f64 / (1024.0 * 1024.0))
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// `{"error": "..."}` body used by the proxy for every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// JSON returned through the upload proxy.
///
/// The backend owns the schema of accepted replies, so they stay a JSON document;
/// the proxy's own failure shape is recognised explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadReply {
    Failed(ErrorBody),
    Accepted(serde_json::Value),
}

impl UploadReply {
    pub fn is_accepted(&self) -> bool {
        matches!(self, UploadReply::Accepted(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UploadReply::Failed(body) => Some(&body.error),
            UploadReply::Accepted(_) => None,
        }
    }

    /// Generated questions, when the backend already returns them.
    pub fn quiz(&self) -> Option<&[serde_json::Value]> {
        match self {
            UploadReply::Accepted(value) => value.get("quiz")?.as_array().map(Vec::as_slice),
            UploadReply::Failed(_) => None,
        }
    }

    /// `status` field of backend acknowledgements such as `{"status": "success", ...}`.
    pub fn status(&self) -> Option<&str> {
        match self {
            UploadReply::Accepted(value) => value.get("status")?.as_str(),
            UploadReply::Failed(_) => None,
        }
    }

    pub fn into_value(self) -> serde_json::Value {
        match self {
            UploadReply::Accepted(value) => value,
            UploadReply::Failed(body) => serde_json::json!({ "error": body.error }),
        }
    }
}
