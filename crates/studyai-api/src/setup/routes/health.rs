//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub upstream: String,
    pub environment: String,
}

/// Liveness probe - process is running.
pub(super) async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check. The backend is not contacted: its availability is reported per upload.
pub(super) async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let upstream = if state.upstream.upload_url().is_empty() {
        "unconfigured"
    } else {
        "configured"
    };

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        upstream: upstream.to_string(),
        environment: state.config.environment().to_string(),
    })
}
