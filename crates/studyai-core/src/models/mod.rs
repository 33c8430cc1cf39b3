//! Upload models shared by the proxy, the API client and the UI components.

pub mod state;
pub mod upload;

pub use state::{GenerationState, TransferProgress};
pub use upload::{ErrorBody, SelectedFile, UploadReply};
