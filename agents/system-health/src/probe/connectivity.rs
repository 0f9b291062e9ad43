//! Internet connectivity probe

use std::time::Duration;

use system_health_core::Health;

use super::{HealthProbe, ProbeFuture};
use crate::config::Settings;

/// Probe that expects `204 No Content` from a well-known endpoint
pub struct ConnectivityProbe {
    url: String,
    timeout: Duration,
}

impl ConnectivityProbe {
    pub const NAME: &'static str = "connectivity";

    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.connectivity_url.clone(), settings.probe_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl HealthProbe for ConnectivityProbe {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn check(&self) -> ProbeFuture {
        let url = self.url.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            let client = match reqwest::Client::builder().timeout(timeout).build() {
                Ok(c) => c,
                Err(e) => {
                    return Health::down(format!("Failed to create HTTP client: {}", e));
                }
            };

            match client.get(&url).send().await {
                Ok(response) if response.status() == reqwest::StatusCode::NO_CONTENT => {
                    Ok(Health::up())
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    tracing::warn!(url = %url, status, "connectivity probe got unexpected status");
                    Health::down(format!("Unexpected response status: {}", status))
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "connectivity probe failed");
                    Health::down(format!("Connectivity check failed: {}", e))
                }
            }
        })
    }
}
