//! System Health Agent
//!
//! Probe-driven system health built on `system-health-core`. Each request
//! or command builds its own tree from the registered probes, aggregates it
//! once and hands it to a transport.
//!
//! ## Architecture
//!
//! 1. **Probes** (`probe/`): leaf producers such as the connectivity check,
//!    grouped into named components.
//! 2. **Service** (`service`): assembles and aggregates the tree.
//! 3. **Handler** (`handler/`): axum routes mapping UP to 200 and DOWN to 503.
//! 4. **CLI** (`cli/`): `health`, `info` and `serve` commands; DOWN exits
//!    with 1, invalid settings with 3.
//! 5. **Config** (`config`): `SYSTEM_HEALTH_*` environment settings.
//! 6. **Info** (`info`): token-gated system information with secrets redacted.
//!
//! ## CLI Usage
//!
//! ```bash
//! system-health health --format yaml
//! system-health info --include-environ
//! system-health serve --host 0.0.0.0 --port 8000
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod info;
pub mod probe;
pub mod service;

pub use cli::{ExitCode, SystemHealthCli};
pub use config::{LogFormat, Settings};
pub use error::AgentError;
pub use handler::{create_router, AppState};
pub use info::{system_info, InfoOptions};
pub use probe::{ComponentGroup, ConnectivityProbe, HealthProbe, ProbeFuture};
pub use service::HealthService;

/// Agent version (from Cargo.toml)
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI application and map errors to exit codes.
///
/// `settings` is the outcome of loading them, so a bad setting takes the same
/// path as any other invalid input.
pub async fn run_cli(cli: SystemHealthCli, settings: error::Result<Settings>) -> ExitCode {
    let result = match settings {
        Ok(settings) => cli::run(cli, settings).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_user_error() {
                ExitCode::InvalidInput
            } else {
                ExitCode::InternalError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_bad_settings_exit_invalid_input() {
        let cli = SystemHealthCli::try_parse_from(["system-health", "health"]).unwrap();
        let settings = Settings::from_lookup(|name| {
            (name == "SYSTEM_HEALTH_PROBE_TIMEOUT_MS").then(|| "soon".to_string())
        });

        let code = run_cli(cli, settings).await;

        assert_eq!(code, ExitCode::InvalidInput);
        assert_eq!(i32::from(code), 3);
    }

    #[tokio::test]
    async fn test_info_exits_success() {
        let cli = SystemHealthCli::try_parse_from(["system-health", "info"]).unwrap();
        assert_eq!(run_cli(cli, Ok(Settings::default())).await, ExitCode::Success);
    }
}
