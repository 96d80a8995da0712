//! HTTP surface of the Assetrix demo app.
//!
//! [`router`] wires the greeting, health and version handlers onto an axum
//! [`Router`]; the binary binds it to a socket.

pub mod error;
pub mod handlers;
mod state;

pub use state::ServerState;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

/// Builds the application router over shared state.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    // Health probes are not request-logged.
    let logged_routes = Router::new()
        .route(
            "/",
            get(handlers::greeting::greet).fallback(handlers::not_found),
        )
        .route(
            "/api/version",
            get(handlers::version::show).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route(
            "/health",
            get(handlers::health::check).fallback(handlers::not_found),
        )
        .layer(cors)
        .with_state(state)
}
