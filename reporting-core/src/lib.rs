//! reporting-core: settings shared by the reporting service crates

pub mod error;
pub mod settings;

pub use error::{ConfigError, Result};
pub use settings::{DatabaseSource, PoolSettings, PostgresComponents, Settings};
