//! System Health Core
//!
//! A model for the health of a system as a tree of named components, and a
//! deterministic fold that turns the tree into one aggregate status with a
//! human-readable reason.
//!
//! ## Modules
//!
//! 1. **Health** (`health`): the [`Health`] node and its status/reason
//!    invariants, checked on construction, on wholesale component
//!    replacement and on deserialization.
//! 2. **Aggregate** (`aggregate`): [`Health::compute_health_from_components`],
//!    the post-order fold.
//! 3. **Render** (`render`): `UP` / `DOWN: <reason>` display and the
//!    `{status, reason, components}` structural form as JSON or YAML.
//!
//! The engine performs no I/O and keeps no state between calls. Leaf values
//! come from probes owned by the caller.
//!
//! ## Example
//!
//! ```rust
//! use system_health_core::Health;
//!
//! # fn main() -> system_health_core::Result<()> {
//! let mut root = Health::up()
//!     .with_component("database", Health::down("DB failure")?)
//!     .with_component("cache", Health::up());
//!
//! root.compute_health_from_components();
//!
//! assert!(root.is_down());
//! assert_eq!(root.to_string(), "DOWN: Component 'database' is DOWN");
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod health;
pub mod render;

pub use aggregate::compute_health_from_components;
pub use error::{HealthError, Result};
pub use health::{Components, Health, HealthStatus};
pub use render::OutputFormat;
