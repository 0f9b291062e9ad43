//! Bottom-up aggregation of a health tree
//!
//! Children are resolved before their parent looks at them. A node that is
//! already DOWN keeps its own reason; its children are still resolved so the
//! whole tree is consistent for consumers that inspect it.

use crate::health::Health;

impl Health {
    /// Fold the children's statuses into this node, in place.
    ///
    /// Returns `self` so the call can be chained before serialization.
    pub fn compute_health_from_components(&mut self) -> &mut Self {
        if self.components.is_empty() {
            return self;
        }

        for child in self.components.values_mut() {
            child.compute_health_from_components();
        }

        if self.is_down() {
            return self;
        }

        let down: Vec<&str> = self
            .components
            .iter()
            .filter(|(_, child)| child.is_down())
            .map(|(name, _)| name.as_str())
            .collect();

        if let Some(reason) = down_reason(&down) {
            tracing::debug!(reason = %reason, "health node aggregated to DOWN");
            self.mark_down(reason);
        }

        self
    }

    /// Consuming variant of [`Health::compute_health_from_components`]
    pub fn into_aggregated(mut self) -> Self {
        self.compute_health_from_components();
        self
    }
}

/// Aggregate `node` in place and hand it back
pub fn compute_health_from_components(node: &mut Health) -> &mut Health {
    node.compute_health_from_components()
}

fn down_reason(names: &[&str]) -> Option<String> {
    match names {
        [] => None,
        [name] => Some(format!("Component '{}' is DOWN", name)),
        _ => {
            let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
            Some(format!("Components {} are DOWN", quoted.join(", ")))
        }
    }
}
