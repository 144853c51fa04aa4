/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "backend": "postgres",
///   "loadState": { "state": "ready" }
/// }
/// ```
///
/// `status` is `degraded` until a bulk load has succeeded.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use vena_shared::data::LoadState;

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Row store backend name
    pub backend: String,

    /// Bulk load progress
    pub load_state: LoadState,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let load_state = state.data.load_state().await;

    Json(HealthResponse {
        status: if load_state.is_ready() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.data.backend().to_string(),
        load_state,
    })
}
