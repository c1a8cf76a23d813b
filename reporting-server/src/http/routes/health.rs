//! Health check endpoint

use axum::{routing::get, Json, Router};

use super::StatusResponse;

/// GET /health
async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
