//! Leaf health producers
//!
//! A probe performs whatever I/O it needs and hands back a validated
//! [`Health`] value. Probes bound their own waiting; the engine never does.

mod connectivity;

pub use connectivity::*;

use std::future::Future;
use std::pin::Pin;

use system_health_core::Health;

use crate::error::{AgentError, Result};

/// Future returned by [`HealthProbe::check`]
pub type ProbeFuture =
    Pin<Box<dyn Future<Output = system_health_core::Result<Health>> + Send>>;

/// Trait for health probes
pub trait HealthProbe: Send + Sync {
    /// Component name the result is registered under
    fn name(&self) -> &str;

    /// Run the probe (the returned future owns everything it needs)
    fn check(&self) -> ProbeFuture;
}

/// A named container whose children are other probes.
///
/// Children run concurrently; their results are inserted in registration
/// order under an UP node. Aggregation later derives the group's status.
/// Child names are unique within a group.
pub struct ComponentGroup {
    name: String,
    probes: Vec<Box<dyn HealthProbe>>,
}

impl ComponentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            probes: Vec::new(),
        }
    }

    /// Register a child probe, rejecting a name that is already taken
    pub fn register(&mut self, probe: impl HealthProbe + 'static) -> Result<()> {
        register(&mut self.probes, Box::new(probe))
    }

    /// Builder form of [`ComponentGroup::register`]; a duplicate is logged
    /// and dropped, keeping the first probe
    pub fn with_probe(mut self, probe: impl HealthProbe + 'static) -> Self {
        if let Err(e) = self.register(probe) {
            tracing::warn!(group = %self.name, error = %e, "probe not registered");
        }
        self
    }

    pub fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }
}

impl HealthProbe for ComponentGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ProbeFuture {
        Box::pin(run_all(&self.probes, Health::up()))
    }
}

/// Append `probe` unless another probe already uses its name
pub(crate) fn register(
    probes: &mut Vec<Box<dyn HealthProbe>>,
    probe: Box<dyn HealthProbe>,
) -> Result<()> {
    if probes.iter().any(|p| p.name() == probe.name()) {
        return Err(AgentError::DuplicateComponent(probe.name().to_string()));
    }
    probes.push(probe);
    Ok(())
}

/// Run `probes` concurrently and attach their results to `root` in
/// registration order
pub(crate) fn run_all(
    probes: &[Box<dyn HealthProbe>],
    root: Health,
) -> impl Future<Output = system_health_core::Result<Health>> + Send + 'static {
    let names: Vec<String> = probes.iter().map(|p| p.name().to_string()).collect();
    let checks: Vec<ProbeFuture> = probes.iter().map(|p| p.check()).collect();

    async move {
        let results = futures::future::join_all(checks).await;
        names
            .into_iter()
            .zip(results)
            .try_fold(
                root,
                |node, (name, result)| -> system_health_core::Result<Health> {
                    Ok(node.with_component(name, result?))
                },
            )
    }
}
