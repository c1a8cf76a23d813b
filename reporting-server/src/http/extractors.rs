//! Custom Axum extractors

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::db::{Database, DbSession};

/// Check out a scoped session for the duration of the handler.
///
/// The session is dropped, and its connection returned to the pool, once the
/// handler finishes, whether it returns normally, returns an error or panics.
impl<S> FromRequestParts<S> for DbSession
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let database = Database::from_ref(state);
        Ok(database.session().await?)
    }
}
