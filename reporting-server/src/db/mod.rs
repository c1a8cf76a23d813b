//! Database layer - connection pool and scoped sessions
//!
//! - One lazily connected pool per process, validated before each checkout
//! - One session per request, returned to the pool when dropped

pub mod error;
pub mod pool;
pub mod session;

pub use error::DbError;
pub use pool::Database;
pub use session::{DbSession, Scoped, SessionStats};
