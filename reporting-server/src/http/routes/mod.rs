//! Route handlers
//!
//! - root: service status at `/`
//! - health: liveness check, mounted under [`REPORTING_PREFIX`]

pub mod health;
pub mod root;

use axum::Router;
use serde::Serialize;

/// Path prefix for the reporting router
pub const REPORTING_PREFIX: &str = "/api/reporting";

/// Static `{"status": ...}` payload
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Routes served under [`REPORTING_PREFIX`]
pub fn reporting_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().merge(health::router())
}
