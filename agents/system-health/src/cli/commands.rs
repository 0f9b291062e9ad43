//! CLI command definitions for the System Health Agent

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;

use super::output::{render_document, render_health, CliFormat, DocumentFormat};
use super::ExitCode;
use crate::config::Settings;
use crate::error::{AgentError, Result};
use crate::handler::{create_router, AppState};
use crate::info::{system_info, InfoOptions};
use crate::service::HealthService;

/// System Health Agent CLI
///
/// Determine system health from the registered probes, or serve it over HTTP.
#[derive(Parser, Debug)]
#[command(name = "system-health")]
#[command(about = "System Health Agent - hierarchical health status", long_about = None)]
#[command(version)]
pub struct SystemHealthCli {
    /// Output verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Determine and print system health
    ///
    /// Exits with 0 when the system is UP and 1 when it is DOWN.
    Health {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: CliFormat,
    },

    /// Determine and print system info
    ///
    /// Secret-looking values are redacted unless --no-filter-secrets is given.
    Info {
        /// Include environment variables
        #[arg(long)]
        include_environ: bool,

        /// Print secrets in clear text
        #[arg(long)]
        no_filter_secrets: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: DocumentFormat,
    },

    /// Start the HTTP server exposing the health endpoints
    Serve {
        /// Host to bind the server to
        #[arg(long, default_value = "127.0.0.1", env = "SYSTEM_HEALTH_HOST")]
        host: String,

        /// Port to bind the server to
        #[arg(short, long, default_value = "8000", env = "SYSTEM_HEALTH_PORT")]
        port: u16,
    },
}

/// Execute the health command
pub async fn execute_health(settings: &Settings, format: CliFormat) -> Result<ExitCode> {
    let service = HealthService::from_settings(settings);
    let health = service.health().await?;

    println!("{}", render_health(&health, format)?);

    Ok(ExitCode::from_health(&health))
}

/// Execute the info command
pub fn execute_info(
    settings: &Settings,
    options: InfoOptions,
    format: DocumentFormat,
) -> Result<ExitCode> {
    let info = system_info(settings, options)?;
    println!("{}", render_document(&info, format)?);
    Ok(ExitCode::Success)
}

/// Execute the serve command; returns once the server shuts down
pub async fn execute_serve(settings: &Settings, host: &str, port: u16) -> Result<ExitCode> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| AgentError::config(format!("Invalid bind address '{}:{}': {}", host, port, e)))?;

    let state = Arc::new(AppState::from_settings(settings));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting System Health Agent on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AgentError::Server(e.to_string()))?;

    tracing::info!("System Health Agent stopped");
    Ok(ExitCode::Success)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
