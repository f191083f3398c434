//! API routes

mod applications;
pub mod auth;
mod health;
mod jobs;
pub mod types;
mod users;
pub mod validation;

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::state::{AppState, MetricsHandle};

/// Optional parts of the router
#[derive(Default, Clone)]
pub struct RouterOptions<'a> {
    /// Prometheus handle backing `GET /metrics`
    pub metrics_handle: Option<Arc<MetricsHandle>>,
    /// Directory holding the built single-page UI
    pub static_dir: Option<&'a Path>,
}

/// Every JSON endpoint, without prefix
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(jobs::routes())
        .merge(applications::routes())
}

/// GET /metrics
async fn get_metrics(State(handle): State<Arc<MetricsHandle>>) -> impl IntoResponse {
    handle.render()
}

/// Create the main router.
///
/// The API is served both at the root and under `/api`, the prefix the UI
/// uses when it is served from the same origin.
pub fn create_router(state: AppState, options: RouterOptions<'_>) -> Router {
    let mut router = Router::new()
        .merge(health::routes())
        .merge(api_routes())
        .nest("/api", api_routes())
        .with_state(state);

    if let Some(handle) = options.metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(get_metrics))
                .with_state(handle),
        );
    }

    // SPA files must come last so they never shadow an API route
    if let Some(dir) = options.static_dir {
        info!("Serving static files from {}", dir.display());
        let index = ServeFile::new(dir.join("index.html"));
        // Unknown paths get index.html with a 200 so client-side routes load
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router.layer(CorsLayer::permissive())
}
