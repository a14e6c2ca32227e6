use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::Arc;

use super::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "battery-buyback",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Pickups cannot be priced until a pricing configuration exists
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.quote_configs.latest() {
        Some(config) => (StatusCode::OK, Json(json!({
            "status": "ready",
            "service": "battery-buyback",
            "activeQuoteConfigId": config.id,
        }))),
        None => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
            "status": "not_ready",
            "service": "battery-buyback",
            "reason": "no pricing configuration",
        }))),
    }
}

/// Prometheus metrics endpoint
pub async fn metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_requires_pricing_config() {
        let empty = AppState::new(Store::empty(), chrono::Duration::days(30));
        let response = readiness_check(State(empty)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let seeded = AppState::new(Store::seeded(), chrono::Duration::days(30));
        let response = readiness_check(State(seeded)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_handler() {
        // Create a handle for testing without initializing global recorder
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let state = Arc::new(recorder.handle());

        let response = metrics(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
