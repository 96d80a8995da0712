use std::sync::Arc;

use assetrix_core::HealthResponse;
use axum::{extract::State, Json};
use tracing::debug;

use crate::ServerState;

/// GET /health - Liveness probe.
pub async fn check(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let body = HealthResponse::healthy(state.clock.as_ref());
    debug!(status = body.status.as_str(), uptime = body.uptime, "health check");
    Json(body)
}
