//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use studyai_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        upstream = %config.upstream_upload_url(),
        "Configuration loaded and validated successfully"
    );

    build_app(config)
}

/// Build state and router without touching global telemetry (used by tests).
pub fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let state = AppState::new(config.clone())?.shared();
    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
