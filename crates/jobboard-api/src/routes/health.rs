//! Health check endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check handler; reports `503` when the database is unreachable
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    metrics::counter!("jobboard_health_checks_total").increment(1);

    let database_ok = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            false
        }
    };

    let (status, label) = if database_ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if database_ok { "ok" } else { "unreachable" }.to_string(),
        }),
    )
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}
