//! Health service
//!
//! Builds a fresh tree from the registered probes on every call and
//! aggregates it once. Nothing is cached between calls.
//!
//! The service can also be marked unhealthy as a whole. The root then starts
//! out DOWN with [`SYSTEM_UNHEALTHY_REASON`], which aggregation keeps.

use std::sync::atomic::{AtomicBool, Ordering};

use system_health_core::Health;

use crate::config::Settings;
use crate::error::Result;
use crate::probe::{register, run_all, ComponentGroup, ConnectivityProbe, HealthProbe};

/// Name of the module group that owns the connectivity probe
pub const HELLO_COMPONENT: &str = "hello";

/// Root reason while the service is marked unhealthy
pub const SYSTEM_UNHEALTHY_REASON: &str = "System marked as unhealthy";

/// Assembles and aggregates the system health tree
#[derive(Default)]
pub struct HealthService {
    probes: Vec<Box<dyn HealthProbe>>,
    marked_unhealthy: AtomicBool,
}

impl HealthService {
    /// Service with no probes; reports a bare UP root
    pub fn new() -> Self {
        Self::default()
    }

    /// Default probe set: the `hello` module with its connectivity check
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().with_probe(
            ComponentGroup::new(HELLO_COMPONENT)
                .with_probe(ConnectivityProbe::from_settings(settings)),
        )
    }

    /// Register a top-level component, rejecting a name that is already taken
    pub fn register(&mut self, probe: impl HealthProbe + 'static) -> Result<()> {
        register(&mut self.probes, Box::new(probe))
    }

    /// Builder form of [`HealthService::register`]; a duplicate is logged
    /// and dropped, keeping the first probe
    pub fn with_probe(mut self, probe: impl HealthProbe + 'static) -> Self {
        if let Err(e) = self.register(probe) {
            tracing::warn!(error = %e, "probe not registered");
        }
        self
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Force the root DOWN regardless of what the probes report
    pub fn mark_unhealthy(&self) {
        if !self.marked_unhealthy.swap(true, Ordering::SeqCst) {
            tracing::warn!("system marked as unhealthy");
        }
    }

    /// Clear a previous [`HealthService::mark_unhealthy`]
    pub fn mark_healthy(&self) {
        if self.marked_unhealthy.swap(false, Ordering::SeqCst) {
            tracing::info!("system unhealthy mark cleared");
        }
    }

    /// False while the service is marked unhealthy
    pub fn is_healthy(&self) -> bool {
        !self.marked_unhealthy.load(Ordering::SeqCst)
    }

    /// Run all probes and fold the results into one aggregated tree
    pub async fn health(&self) -> system_health_core::Result<Health> {
        let root = if self.is_healthy() {
            Health::up()
        } else {
            Health::down(SYSTEM_UNHEALTHY_REASON)?
        };
        let root = run_all(&self.probes, root).await?.into_aggregated();

        if root.is_down() {
            tracing::warn!(health = %root, "system health is DOWN");
        } else {
            tracing::debug!(health = %root, "system health computed");
        }

        Ok(root)
    }
}
