//! Study AI Core Library
//!
//! This crate provides configuration, error types, upload models and client-side
//! file validation shared by the server, the API client and the UI components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, FrontendConfig, ProxyConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ErrorBody, GenerationState, SelectedFile, TransferProgress, UploadReply};
pub use validation::{FileValidator, ValidationError};
