//! Root greeting handler.

use std::sync::Arc;

use assetrix_core::GreetingResponse;
use axum::{extract::State, Json};

use crate::ServerState;

/// GET / - Welcome message with the current time and deployment environment.
pub async fn greet(State(state): State<Arc<ServerState>>) -> Json<GreetingResponse> {
    Json(GreetingResponse::new(state.clock.as_ref(), state.environment()))
}
