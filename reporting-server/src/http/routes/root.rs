use axum::{routing::get, Json, Router};

use super::StatusResponse;

/// GET /
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "reporting up",
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
