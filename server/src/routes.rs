//! Application router.

use axum::routing::get;
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;

/// Build the application router.
///
/// The domain routes hang off this router; the boot sequence only
/// needs it as the value handed to the listen gate.
pub fn router(prometheus: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(move || async move { prometheus.render() }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
