//! System Health Agent entry point
//!
//! # Exit Codes
//!
//! - 0: Success - system is UP
//! - 1: System is DOWN
//! - 3: Invalid settings or arguments
//! - 10: Internal error
//!
//! Settings are loaded before tracing starts; if they are invalid, logging
//! falls back to the defaults and the error is reported through the CLI.

use clap::Parser;
use system_health::cli::log_directive;
use system_health::{run_cli, LogFormat, Settings, SystemHealthCli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = SystemHealthCli::parse();
    let settings = Settings::from_env();

    let fallback = Settings::default();
    init_tracing(settings.as_ref().unwrap_or(&fallback), cli.verbose);

    let exit_code = run_cli(cli, settings).await;
    std::process::exit(exit_code.into());
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(settings: &Settings, verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if verbose == 0 => EnvFilter::new(directives),
        _ => EnvFilter::new(log_directive(verbose, &settings.log_level)),
    };

    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Plain => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
