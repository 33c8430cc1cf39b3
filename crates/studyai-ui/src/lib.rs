//! Study AI UI state holders
//!
//! Each component of the upload page is an explicit state holder with its own
//! mutation entry points: the dropzone, the callback file picker, the URL input and
//! the home page controller that owns the real upload request.

pub mod backend;
pub mod dropzone;
pub mod file_picker;
pub mod home;
pub mod progress;
pub mod url_input;

pub use backend::QuizBackend;
pub use dropzone::Dropzone;
pub use file_picker::FilePicker;
pub use home::{HomeError, HomePage};
pub use progress::{track_transfer, ProgressTicker};
pub use url_input::{SubmitIcon, UrlInput};
