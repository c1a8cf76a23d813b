//! Scoped database sessions
//!
//! A [`DbSession`] owns one pooled connection for the lifetime of a request.
//! Dropping it hands the connection back to the pool, so release happens on
//! every exit path: normal return, early `?` return, or unwinding panic.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use tracing::trace;

use super::DbError;

/// Point-in-time session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub opened: u64,
    pub closed: u64,
}

impl SessionStats {
    /// Sessions currently held by handlers
    pub fn active(&self) -> u64 {
        self.opened.saturating_sub(self.closed)
    }
}

#[derive(Debug, Default)]
pub(crate) struct SessionCounters {
    opened: AtomicU64,
    closed: AtomicU64,
}

impl SessionCounters {
    pub(crate) fn lease(self: &Arc<Self>) -> SessionLease {
        self.opened.fetch_add(1, Ordering::AcqRel);
        SessionLease {
            counters: Arc::clone(self),
        }
    }

    pub(crate) fn stats(&self) -> SessionStats {
        // closed first: a concurrent close between the loads can only
        // overstate `active`, never underflow it
        let closed = self.closed.load(Ordering::Acquire);
        let opened = self.opened.load(Ordering::Acquire);
        SessionStats { opened, closed }
    }
}

/// Marks one open session; counts it closed on drop
pub(crate) struct SessionLease {
    counters: Arc<SessionCounters>,
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::AcqRel);
        trace!("session closed");
    }
}

/// A connection bound to a single request, counted open until dropped.
pub struct Scoped<C> {
    // Field order matters: the connection is released before the lease
    // records the close.
    conn: C,
    _lease: SessionLease,
}

impl<C> Scoped<C> {
    pub(crate) fn new(conn: C, counters: &Arc<SessionCounters>) -> Self {
        trace!("session opened");
        Self {
            conn,
            _lease: counters.lease(),
        }
    }
}

impl<C: Deref> Deref for Scoped<C> {
    type Target = C::Target;

    fn deref(&self) -> &C::Target {
        self.conn.deref()
    }
}

impl<C: DerefMut> DerefMut for Scoped<C> {
    fn deref_mut(&mut self) -> &mut C::Target {
        self.conn.deref_mut()
    }
}

impl<C> std::fmt::Debug for Scoped<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoped").finish_non_exhaustive()
    }
}

/// A pooled connection bound to a single request.
///
/// Derefs to [`sqlx::PgConnection`], so queries run with `&mut *session`:
///
/// ```ignore
/// async fn handler(mut session: DbSession) -> Result<Json<i32>, ApiError> {
///     let (n,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(&mut *session).await?;
///     Ok(Json(n))
/// }
/// ```
pub type DbSession = Scoped<PoolConnection<Postgres>>;

impl DbSession {
    pub(crate) async fn acquire(
        pool: &PgPool,
        counters: &Arc<SessionCounters>,
    ) -> Result<Self, DbError> {
        let conn = pool.acquire().await.map_err(DbError::acquire)?;
        Ok(Self::new(conn, counters))
    }
}
