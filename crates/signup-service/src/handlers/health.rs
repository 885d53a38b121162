//! Liveness probe.

use tracing::instrument;

/// Handler for GET /health.
///
/// Always `200 "ok"`, including when upstream settings are missing; an
/// unconfigured deployment reports itself through signup responses instead.
#[instrument(skip_all, name = "signup.health.check")]
pub async fn health_check() -> &'static str {
    "ok"
}
