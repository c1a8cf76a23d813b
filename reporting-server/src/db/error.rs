use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Connection URL could not be parsed; raised at startup
    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    /// No connection could be checked out before the acquire timeout
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// Classify a pool checkout failure.
    pub(crate) fn acquire(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err),
            _ => Self::Sqlx(err),
        }
    }
}
