//! HTTP route handlers for the demo app.

pub mod greeting;
pub mod health;
pub mod version;

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Fallback for unknown paths and for known paths hit with an unsupported method.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {} {}", method, uri.path()))
}
