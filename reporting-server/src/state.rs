//! Application state shared across handlers

use axum::extract::FromRef;
use std::sync::Arc;

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    database: Database,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self {
            inner: Arc::new(AppStateInner { database }),
        }
    }

    pub fn database(&self) -> &Database {
        &self.inner.database
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database().clone()
    }
}
