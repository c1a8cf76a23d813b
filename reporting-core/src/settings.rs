//! Service settings loaded once at startup
//!
//! Sources, highest priority first:
//! 1. Process environment
//! 2. Local env file (`.env` by default, optional)
//! 3. Built-in defaults
//!
//! Environment variables:
//!   DATABASE_URL                   # Full connection URL, wins over the fields below
//!   POSTGRES_USER                  # Required without DATABASE_URL
//!   POSTGRES_PASSWORD              # Required without DATABASE_URL
//!   POSTGRES_DB                    # Required without DATABASE_URL
//!   POSTGRES_HOST                  # Default: postgres
//!   POSTGRES_PORT                  # Default: 5432
//!   DB_POOL_MAX_CONNECTIONS        # Default: 15
//!   DB_POOL_ACQUIRE_TIMEOUT_SECS   # Default: 30

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

const DEFAULT_HOST: &str = "postgres";
const DEFAULT_PORT: u16 = 5432;

/// Base pool of 5 plus 10 overflow connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Variables exactly as they appear in the environment.
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    database_url: Option<String>,
    #[serde(default)]
    postgres_user: Option<String>,
    #[serde(default)]
    postgres_password: Option<String>,
    #[serde(default)]
    postgres_db: Option<String>,
    #[serde(default = "default_host")]
    postgres_host: String,
    #[serde(default = "default_port")]
    postgres_port: u16,
    #[serde(default = "default_max_connections")]
    db_pool_max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    db_pool_acquire_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout_secs() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT_SECS
}

/// Individual connection fields, used when no full URL is supplied
#[derive(Clone, PartialEq, Eq)]
pub struct PostgresComponents {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl fmt::Debug for PostgresComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresComponents")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

/// Where the connection string comes from
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// `DATABASE_URL`, used verbatim
    Url(String),
    Components(PostgresComponents),
}

impl fmt::Debug for DatabaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // May embed credentials
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Components(c) => f.debug_tuple("Components").field(c).finish(),
        }
    }
}

/// Connection pool tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

/// Immutable service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: DatabaseSource,
    pub pool: PoolSettings,
}

impl Settings {
    /// Load settings from the process environment, supplemented by `env_file`.
    ///
    /// A missing env file is not an error; a malformed one is.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        Self::load_from(env_file, process_vars())
    }

    /// Like [`Settings::load`], with an explicit set of variables standing in
    /// for the process environment.
    pub fn load_from<I>(env_file: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut merged: HashMap<String, String> = HashMap::new();

        if let Some(path) = env_file {
            match dotenvy::from_path_iter(path) {
                Ok(iter) => {
                    for item in iter {
                        let (key, value) =
                            item.map_err(|e| ConfigError::env_file(path, e))?;
                        merged.insert(key, value);
                    }
                    info!(path = %path.display(), "Loaded env file");
                }
                Err(e) if e.not_found() => {
                    debug!(path = %path.display(), "No env file, using environment only");
                }
                Err(e) => return Err(ConfigError::env_file(path, e)),
            }
        }

        // Process environment wins over the file
        merged.extend(vars);

        Self::from_vars(merged)
    }

    /// Build settings from key/value pairs (keys as environment variable names).
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw: RawSettings = envy::from_iter(vars)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let pool = PoolSettings {
            max_connections: raw.db_pool_max_connections,
            acquire_timeout: Duration::from_secs(raw.db_pool_acquire_timeout_secs),
        };

        if let Some(url) = non_empty(raw.database_url) {
            return Ok(Self {
                database: DatabaseSource::Url(url),
                pool,
            });
        }

        let user = non_empty(raw.postgres_user);
        let password = non_empty(raw.postgres_password);
        let database = non_empty(raw.postgres_db);

        match (user, password, database) {
            (Some(user), Some(password), Some(database)) => Ok(Self {
                database: DatabaseSource::Components(PostgresComponents {
                    user,
                    password,
                    host: raw.postgres_host,
                    port: raw.postgres_port,
                    database,
                }),
                pool,
            }),
            (user, password, database) => {
                let names = [
                    ("POSTGRES_USER", user.is_none()),
                    ("POSTGRES_PASSWORD", password.is_none()),
                    ("POSTGRES_DB", database.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(ConfigError::Missing { names })
            }
        }
    }

    /// The derived connection string.
    ///
    /// Components are interpolated verbatim, without percent-encoding.
    pub fn database_url(&self) -> String {
        match &self.database {
            DatabaseSource::Url(url) => url.clone(),
            DatabaseSource::Components(c) => format!(
                "postgresql://{}:{}@{}:{}/{}",
                c.user, c.password, c.host, c.port, c.database
            ),
        }
    }
}

/// Process environment, minus pairs that are not valid UTF-8.
///
/// `std::env::vars` panics on those, even for variables this service never reads.
fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
        (Ok(key), Ok(value)) => Some((key, value)),
        (key, _) => {
            debug!(key = ?key, "Skipping non UTF-8 environment variable");
            None
        }
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
