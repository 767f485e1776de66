//! Filo Server: file metadata registry.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use filo_api::{AppState, build_app};
use filo_core::config::{AppConfig, ConfigOverrides};
use filo_core::error::AppError;
use filo_database::{DatabasePool, FileRepository, migration};

/// Command-line flags. They override every other configuration source.
#[derive(Debug, Parser)]
#[command(name = "filo-server", version, about = "File metadata registry")]
struct Args {
    /// Directory holding `default.toml` and `{FILO_ENV}.toml`
    #[arg(long, default_value = "config")]
    config: String,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// PostgreSQL connection URL
    #[arg(long = "database-url")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load layered configuration for the environment named by `FILO_ENV`.
fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    let env = std::env::var("FILO_ENV").unwrap_or_else(|_| "development".to_string());
    let overrides = ConfigOverrides {
        port: args.port,
        log_level: args.log_level.clone(),
        database_url: args.database_url.clone(),
    };
    AppConfig::load_with_overrides(&args.config, &env, &overrides)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Filo");

    let pool = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(pool.pool()).await?;

    let store = Arc::new(FileRepository::new(pool.pool().clone()));
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app = build_app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(addr = %addr, "Filo server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });
    let mut server = tokio::spawn(async move { serve.await });

    let finished = tokio::select! {
        result = &mut server => Some(result),
        _ = shutdown_rx.changed() => None,
    };

    let result = match finished {
        Some(result) => result,
        None => {
            info!(
                grace_seconds = grace.as_secs(),
                "Shutdown signal received, draining in-flight requests"
            );
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Grace period elapsed, dropping remaining connections");
                    server.abort();
                    Ok(Ok(()))
                }
            }
        }
    };

    pool.close().await;

    result
        .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Filo server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
