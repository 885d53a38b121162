//! HTTP routes for the signup service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use axum::{
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Shared client for upstream calls.
    pub http_client: reqwest::Client,

    /// Prometheus handle rendered by `/metrics`.
    pub metrics_handle: PrometheusHandle,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/` - Signup webhook (any method; non-POST answered with 405)
/// - `/health` - Liveness probe
/// - `/metrics` - Prometheus scrape endpoint
/// - 405 "Method Not Allowed" for everything else
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", any(handlers::signup_webhook))
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        .route(
            "/metrics",
            get(handlers::metrics_handler).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::method_not_allowed)
        .with_state(state);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    routes
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
