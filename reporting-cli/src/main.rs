mod tracing_setup;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reporting_core::Settings;
use reporting_server::{run_server, Database, ServerConfig};
use tracing_setup::TracingConfig;

/// Accountia reporting service
#[derive(Parser, Debug)]
#[command(name = "reporting-ms", version, about)]
struct Cli {
    /// Address to bind to
    #[arg(long, short = 'b', env = "REPORTING_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Local env file read before the process environment (missing is fine)
    #[arg(long, env = "REPORTING_ENV_FILE", default_value = ".env")]
    env_file: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = tracing_setup::init(&TracingConfig { debug: cli.debug }) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let settings = Settings::load(Some(cli.env_file.as_path())).context("Failed to load settings")?;
    tracing::debug!(?settings, "Settings loaded");

    let database = Database::connect(&settings).context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: cli.bind,
    };

    tracing::info!("Starting reporting service on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(database, config).await.context("Server error")?;

    Ok(())
}
