//! CLI module for the System Health Agent

pub mod commands;
pub mod output;

pub use commands::{Commands, SystemHealthCli};
pub use output::{CliFormat, DocumentFormat};

use system_health_core::Health;

use crate::config::Settings;
use crate::error::Result;
use crate::info::InfoOptions;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded and the system is UP
    Success = 0,
    /// The system is DOWN
    Unhealthy = 1,
    /// Invalid settings or arguments
    InvalidInput = 3,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from an aggregated root
    pub fn from_health(health: &Health) -> Self {
        if health.is_up() {
            ExitCode::Success
        } else {
            ExitCode::Unhealthy
        }
    }
}

/// Log filter directive for the given `-v` count
pub fn log_directive(verbose: u8, default_level: &str) -> String {
    match verbose {
        0 => default_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Run the CLI with the given settings and return the exit code
pub async fn run(cli: SystemHealthCli, settings: Settings) -> Result<ExitCode> {
    match cli.command {
        Commands::Health { format } => commands::execute_health(&settings, format).await,
        Commands::Info {
            include_environ,
            no_filter_secrets,
            format,
        } => commands::execute_info(
            &settings,
            InfoOptions {
                include_environ,
                filter_secrets: !no_filter_secrets,
            },
            format,
        ),
        Commands::Serve { host, port } => commands::execute_serve(&settings, &host, port).await,
    }
}
