use assetrix_core::VersionResponse;
use axum::Json;

/// GET /api/version - Application name and version.
pub async fn show() -> Json<VersionResponse> {
    Json(VersionResponse::default())
}
