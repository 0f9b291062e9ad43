//! Agent settings
//!
//! Loaded from environment variables with the `SYSTEM_HEALTH_` prefix.
//! Blank values count as unset.
//!
//! | Variable                            | Default                                            |
//! |-------------------------------------|----------------------------------------------------|
//! | `SYSTEM_HEALTH_CONNECTIVITY_URL`    | `https://connectivitycheck.gstatic.com/generate_204` |
//! | `SYSTEM_HEALTH_PROBE_TIMEOUT_MS`    | `5000`                                             |
//! | `SYSTEM_HEALTH_LOG_LEVEL`           | `info`                                             |
//! | `SYSTEM_HEALTH_LOG_FORMAT`          | `plain` (`plain` or `json`)                        |
//! | `SYSTEM_HEALTH_ENVIRONMENT`         | `local`                                            |
//! | `SYSTEM_HEALTH_SYSTEM_TOKEN`        | unset (system info endpoints reject every token)   |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AgentError, Result};

/// Prefix shared by all agent environment variables
pub const ENV_PREFIX: &str = "SYSTEM_HEALTH";

pub const DEFAULT_CONNECTIVITY_URL: &str = "https://connectivitycheck.gstatic.com/generate_204";
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Stand-in printed wherever a secret value would appear
pub const REDACTED: &str = "***REDACTED***";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Settings for probes, logging and the system info surface
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL the connectivity probe expects a `204 No Content` from
    pub connectivity_url: String,
    /// Upper bound for a single probe request
    pub probe_timeout: Duration,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    /// Deployment environment reported by system info
    pub environment: String,
    /// Shared secret guarding the system info endpoints
    pub system_token: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("connectivity_url", &self.connectivity_url)
            .field("probe_timeout", &self.probe_timeout)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("environment", &self.environment)
            .field("system_token", &self.system_token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connectivity_url: DEFAULT_CONNECTIVITY_URL.to_string(),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            log_level: "info".to_string(),
            log_format: LogFormat::Plain,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            system_token: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(&env_name(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Settings::default();

        if let Some(url) = get("connectivity_url") {
            settings.connectivity_url = url;
        }

        if let Some(raw) = get("probe_timeout_ms") {
            let ms: u64 = raw.parse().map_err(|_| {
                AgentError::config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    env_name("probe_timeout_ms"),
                    raw
                ))
            })?;
            if ms == 0 {
                return Err(AgentError::config(format!(
                    "{} must be greater than zero",
                    env_name("probe_timeout_ms")
                )));
            }
            settings.probe_timeout = Duration::from_millis(ms);
        }

        if let Some(level) = get("log_level") {
            settings.log_level = level.to_lowercase();
        }

        if let Some(format) = get("log_format") {
            settings.log_format = format.parse().map_err(AgentError::Config)?;
        }

        if let Some(environment) = get("environment") {
            settings.environment = environment;
        }

        settings.system_token = get("system_token");

        Ok(settings)
    }

    /// True when a token is configured and `candidate` matches it exactly.
    ///
    /// With no token configured every candidate is rejected, including the
    /// empty string.
    pub fn is_token_valid(&self, candidate: &str) -> bool {
        match &self.system_token {
            Some(token) => !candidate.is_empty() && token == candidate,
            None => false,
        }
    }
}

/// Build the environment variable name for a settings key
pub fn env_name(key: &str) -> String {
    format!("{}_{}", ENV_PREFIX, key).replace('-', "_").to_uppercase()
}
