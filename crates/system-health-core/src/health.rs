//! Health tree model
//!
//! A [`Health`] node carries a [`HealthStatus`], an optional reason and a map
//! of named child nodes. Every node satisfies two invariants from the moment it
//! exists:
//!
//! - `DOWN` always carries a non-empty reason
//! - `UP` never carries a reason
//!
//! Fields are private. Nodes are obtained through the validating constructors
//! or through deserialization, which runs the same checks.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HealthError, Result};

/// Named child nodes, iterated in insertion order
pub type Components = IndexMap<String, Health>;

/// Status of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// Operational
    Up,
    /// Not operational; always paired with a reason
    Down,
}

impl HealthStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Up => "UP",
            HealthStatus::Down => "DOWN",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UP" => Ok(HealthStatus::Up),
            "DOWN" => Ok(HealthStatus::Down),
            _ => Err(format!("Unknown health status: {}", s)),
        }
    }
}

/// One node of a health tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHealth")]
pub struct Health {
    pub(crate) status: HealthStatus,
    pub(crate) reason: Option<String>,
    pub(crate) components: Components,
}

/// Unvalidated wire shape. Converting it validates every node top-down and
/// reports the first violation as the matching [`HealthError`].
#[derive(Deserialize)]
pub(crate) struct RawHealth {
    status: HealthStatus,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    components: IndexMap<String, RawHealth>,
}

impl TryFrom<RawHealth> for Health {
    type Error = HealthError;

    fn try_from(raw: RawHealth) -> Result<Self> {
        validate(raw.status, raw.reason.as_deref())?;
        let components = raw
            .components
            .into_iter()
            .map(|(name, child)| Ok((name, Health::try_from(child)?)))
            .collect::<Result<Components>>()?;
        Health::new(raw.status, raw.reason, components)
    }
}

impl Health {
    /// Build a node, rejecting an inconsistent status/reason pair
    pub fn new(status: HealthStatus, reason: Option<String>, components: Components) -> Result<Self> {
        validate(status, reason.as_deref())?;
        Ok(Self {
            status,
            reason,
            components,
        })
    }

    /// An UP leaf
    pub fn up() -> Self {
        Self {
            status: HealthStatus::Up,
            reason: None,
            components: Components::new(),
        }
    }

    /// A DOWN leaf; fails if `reason` is empty
    pub fn down(reason: impl Into<String>) -> Result<Self> {
        Self::new(HealthStatus::Down, Some(reason.into()), Components::new())
    }

    /// Append a named child, replacing any existing child of the same name
    /// in place
    pub fn with_component(mut self, name: impl Into<String>, child: Health) -> Self {
        self.components.insert(name.into(), child);
        self
    }

    /// Replace all children at once.
    ///
    /// Re-validates this node's own status/reason pair; the children were
    /// validated when they were built. On error the node is left unchanged.
    pub fn set_components(&mut self, components: Components) -> Result<()> {
        validate(self.status, self.reason.as_deref())?;
        self.components = components;
        Ok(())
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Look up a direct child by name
    pub fn component(&self, name: &str) -> Option<&Health> {
        self.components.get(name)
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }

    pub fn is_down(&self) -> bool {
        self.status == HealthStatus::Down
    }

    /// True when the node has no children
    pub fn is_leaf(&self) -> bool {
        self.components.is_empty()
    }

    /// Set a consistent DOWN pair. Callers guarantee `reason` is non-empty.
    pub(crate) fn mark_down(&mut self, reason: String) {
        debug_assert!(!reason.is_empty());
        self.status = HealthStatus::Down;
        self.reason = Some(reason);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::up()
    }
}

fn validate(status: HealthStatus, reason: Option<&str>) -> Result<()> {
    match (status, reason) {
        (HealthStatus::Down, None) => Err(HealthError::DownWithoutReason),
        (HealthStatus::Down, Some(r)) if r.is_empty() => Err(HealthError::DownWithoutReason),
        (HealthStatus::Up, Some(_)) => Err(HealthError::UpWithReason),
        _ => Ok(()),
    }
}
