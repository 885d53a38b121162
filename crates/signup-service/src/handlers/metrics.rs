//! Prometheus metrics endpoint handler.
//!
//! # Security
//!
//! This endpoint is unauthenticated to allow Prometheus to scrape metrics.
//! No emails, secrets or tokens appear in metrics; labels have bounded
//! cardinality.

use crate::routes::AppState;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

/// Handler for GET /metrics
///
/// Returns 200 OK with Prometheus text format:
/// ```text
/// # TYPE signup_requests_total counter
/// signup_requests_total{outcome="success"} 42
/// ```
#[tracing::instrument(skip_all, name = "signup.metrics.scrape")]
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics_handle.render()
}

// The rendered output is covered by the router tests, which build a
// detached handle per test.
