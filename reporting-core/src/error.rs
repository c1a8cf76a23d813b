//! Structured error types for reporting-core.
//!
//! The binary wraps these with `anyhow` context; library consumers get
//! the concrete variant.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading [`crate::Settings`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required connection fields absent and no `DATABASE_URL` given
    #[error("missing required settings: {} (set them or provide DATABASE_URL)", .names.join(", "))]
    Missing { names: Vec<&'static str> },

    /// A variable was present but could not be parsed
    #[error("invalid setting: {0}")]
    Invalid(#[from] envy::Error),

    /// The local env file exists but could not be read or parsed
    #[error("failed to read env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Result type alias for settings operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub fn env_file(path: impl Into<PathBuf>, source: dotenvy::Error) -> Self {
        Self::EnvFile {
            path: path.into(),
            source,
        }
    }
}
