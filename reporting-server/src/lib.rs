//! reporting-server: HTTP application and database access for the
//! reporting service
//!
//! Composition is settings -> [`db::Database`] -> [`http::app`] ->
//! [`http::run_server`].

pub mod db;
pub mod http;
pub mod state;

pub use db::{Database, DbError, DbSession, Scoped, SessionStats};
pub use http::{app, run_server, ServerConfig, ServerError};
pub use state::AppState;
