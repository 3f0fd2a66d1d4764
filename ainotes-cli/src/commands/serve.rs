//! HTTP server command
//!
//! Settings resolve flag > environment > config file > built-in default.
//! The schema bootstrap runs before the listener binds; if the database
//! cannot be opened the process exits without serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ainotes_core::{NotesConfig, ServeConfig};
use ainotes_server::db::{create_pool, migrations};
use ainotes_server::{run_server, ServerConfig};
use anyhow::{Context, Result};
use clap::Parser;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "AINOTES_BIND")]
    pub bind: Option<SocketAddr>,

    /// SQLite database file, created if missing (default: ./notes.db)
    #[arg(long, env = "AINOTES_DATABASE")]
    pub database: Option<PathBuf>,

    /// Browser origin allowed to call the API (default: http://localhost:5173)
    #[arg(long, env = "AINOTES_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = NotesConfig::load().context("Failed to load config")?;
    let (database, config) = resolve(args, file.serve)?;

    tracing::info!("Opening database at {}", database.display());
    let pool = create_pool(&database)
        .await
        .with_context(|| format!("Failed to open database at {}", database.display()))?;

    migrations::run(&pool)
        .await
        .context("Failed to initialize notes schema")?;

    tracing::info!("Starting ainotes server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

/// Merge command-line/env values over the config file section.
fn resolve(args: ServeArgs, file: ServeConfig) -> Result<(PathBuf, ServerConfig)> {
    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => file.bind_addr()?,
    };

    let config = ServerConfig {
        bind_addr,
        cors_origin: args.cors_origin.unwrap_or(file.cors_origin),
        request_timeout: Duration::from_secs(args.timeout.unwrap_or(file.timeout_secs)),
    };

    Ok((args.database.unwrap_or(file.database), config))
}
