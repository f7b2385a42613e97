//! Liveness endpoint for load balancers and deploy checks.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Payload of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Name of the service that answered.
    pub service: String,
    /// Always "ok"; a reachable process is a healthy one.
    pub status: String,
    /// Crate version baked in at compile time.
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "mystquest-api".to_string(),
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Router for the liveness endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
