//! Application state

use jobboard_auth::JwtManager;
use jobboard_db::Database;
use std::sync::Arc;

/// Handle used to render the Prometheus exposition
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    pub fn new(db: Database, jwt: Arc<JwtManager>) -> Self {
        Self { db, jwt }
    }
}
