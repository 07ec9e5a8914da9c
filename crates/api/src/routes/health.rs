use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a store endpoint was configured at startup.
    pub store_configured: bool,
    /// Whether the store answered a round-trip.
    pub store_healthy: bool,
}

/// GET /health -- returns service and store health.
///
/// Running unconfigured is a supported mode, so it reports `ok`; only a
/// configured store that does not answer is `degraded`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_configured = state.store.is_configured();
    let store_healthy = store_configured && state.store.health_check().await;

    let status = if store_configured && !store_healthy {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_configured,
        store_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
