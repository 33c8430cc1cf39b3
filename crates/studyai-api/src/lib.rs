//! Study AI API Library
//!
//! This crate provides the HTTP handlers, middleware, and application setup of the
//! Study AI frontend server: the landing page and the upload proxy route.

mod handlers;
mod middleware;
mod services;
mod telemetry;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upstream::UpstreamClient;
pub use state::AppState;
