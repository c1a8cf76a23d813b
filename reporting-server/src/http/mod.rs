//! HTTP server layer
//!
//! Axum server with:
//! - `GET /` service status
//! - `GET /api/reporting/health` liveness
//! - Request ids, tracing, panic recovery
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{app, run_server, ServerConfig, ServerError};
