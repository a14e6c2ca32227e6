use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    signals::setup_signal_handlers,
    store::Store,
};

/// Start the buy-back API server
///
/// This function:
/// 1. Initializes metrics (if enabled)
/// 2. Builds the in-memory store, seeded with sample data if configured
/// 3. Sets up signal handlers for graceful shutdown
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let store = if config.storage.seed_sample_data {
        Store::seeded()
    } else {
        Store::empty()
    };
    let app_state = AppState::new(store, config.quotes.validity());

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(app_state, metrics_handle, &config.metrics.endpoint);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting battery buy-back API on {}", addr);
    info!(
        "Configuration: quotes valid for {} days, sample data {}, metrics {}",
        config.quotes.validity_days,
        if config.storage.seed_sample_data { "loaded" } else { "skipped" },
        if config.metrics.enabled { "enabled" } else { "disabled" },
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    app_state: AppState,
    metrics_handle: Option<Arc<PrometheusHandle>>,
    metrics_endpoint: &str,
) -> Router {
    let api_routes = Router::new()
        .route(
            "/user/:user_id",
            get(handlers::users::get_user)
                .post(handlers::users::create_user)
                .put(handlers::users::put_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/pickup/:pickup_id",
            get(handlers::pickups::get_pickup).post(handlers::pickups::create_pickup),
        )
        .route("/quote/:quote_id", get(handlers::quotes::get_quote))
        .route(
            "/agreement/:agreement_id",
            get(handlers::agreements::get_agreement)
                .post(handlers::agreements::create_agreement),
        )
        .route(
            "/quoteConfig/:config_id",
            get(handlers::quote_configs::get_quote_config)
                .post(handlers::quote_configs::create_quote_config),
        )
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route(metrics_endpoint, get(handlers::health::metrics))
                .with_state(handle),
        );
    }

    router
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}
