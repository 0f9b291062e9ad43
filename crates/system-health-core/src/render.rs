//! Textual and structural presentation of health trees
//!
//! The one-line form (`UP` / `DOWN: <reason>`) is what logs and terse CLI
//! output use. The structural form is `{status, reason, components}`,
//! recursively, rendered as JSON or YAML for the transport layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::health::{Health, HealthStatus, RawHealth};

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) if self.is_down() => write!(f, "DOWN: {}", reason),
            _ => f.write_str(self.status().as_str()),
        }
    }
}

/// Structural output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Render the full tree in the requested format
pub fn render(health: &Health, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json_pretty(health),
        OutputFormat::Yaml => to_yaml(health),
    }
}

pub fn to_json_pretty(health: &Health) -> Result<String> {
    Ok(serde_json::to_string_pretty(health)?)
}

pub fn to_yaml(health: &Health) -> Result<String> {
    Ok(serde_yaml::to_string(health)?)
}

/// Parse a JSON tree.
///
/// Malformed input is a [`crate::HealthError::Serialization`]; a well-formed
/// tree with an inconsistent node fails with that node's validation error.
pub fn from_json(input: &str) -> Result<Health> {
    let raw: RawHealth = serde_json::from_str(input)?;
    Health::try_from(raw)
}

/// Parse a YAML tree, with the same error split as [`from_json`]
pub fn from_yaml(input: &str) -> Result<Health> {
    let raw: RawHealth = serde_yaml::from_str(input)?;
    Health::try_from(raw)
}

impl Health {
    /// Indented one-line-per-node view of the tree, root first, each line
    /// paired with the status of the node it describes.
    ///
    /// The root line carries no name; children are rendered as
    /// `<name>: <status line>` with two spaces of indentation per level.
    pub fn summary_entries(&self) -> Vec<(String, HealthStatus)> {
        let mut entries = vec![(self.to_string(), self.status())];
        collect_entries(self, 1, &mut entries);
        entries
    }

    /// [`Health::summary_entries`] without the statuses
    pub fn summary_lines(&self) -> Vec<String> {
        self.summary_entries()
            .into_iter()
            .map(|(line, _)| line)
            .collect()
    }
}

fn collect_entries(node: &Health, depth: usize, entries: &mut Vec<(String, HealthStatus)>) {
    for (name, child) in node.components() {
        entries.push((
            format!("{}{}: {}", "  ".repeat(depth), name, child),
            child.status(),
        ));
        collect_entries(child, depth + 1, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthError;

    #[test]
    fn test_display_up() {
        assert_eq!(Health::up().to_string(), "UP");
    }

    #[test]
    fn test_display_down() {
        let health = Health::down("Service unavailable").unwrap();
        assert_eq!(health.to_string(), "DOWN: Service unavailable");
    }

    #[test]
    fn test_display_does_not_recurse() {
        let health = Health::up().with_component("db", Health::down("gone").unwrap());
        assert_eq!(health.to_string(), "UP");
    }

    #[test]
    fn test_json_shape() {
        let health = Health::up()
            .with_component("database", Health::down("DB failure").unwrap())
            .with_component("cache", Health::up())
            .into_aggregated();

        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], "DOWN");
        assert_eq!(value["reason"], "Component 'database' is DOWN");
        assert_eq!(value["components"]["database"]["reason"], "DB failure");
        assert!(value["components"]["cache"]["reason"].is_null());
        assert_eq!(
            value["components"]["cache"]["components"],
            serde_json::json!({})
        );
    }

    #[test]
    fn test_json_preserves_component_order() {
        let health = Health::up()
            .with_component("zeta", Health::up())
            .with_component("alpha", Health::up());
        let json = to_json_pretty(&health).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
    }

    #[test]
    fn test_yaml_contains_tree() {
        let health = Health::up().with_component("cache", Health::up());
        let yaml = render(&health, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("status: UP"));
        assert!(yaml.contains("cache:"));
    }

    #[test]
    fn test_parse_rejects_invalid_nodes() {
        let err = from_json(r#"{"status": "DOWN", "reason": null}"#).unwrap_err();
        assert_eq!(err, HealthError::DownWithoutReason);
        assert!(err.is_validation());

        let err = from_yaml("status: UP\nreason: nope\n").unwrap_err();
        assert_eq!(err, HealthError::UpWithReason);
        assert!(err.is_validation());

        let nested = r#"{"status": "UP", "components": {"db": {"status": "DOWN"}}}"#;
        assert_eq!(from_json(nested).unwrap_err(), HealthError::DownWithoutReason);
    }

    #[test]
    fn test_parse_malformed_is_serialization() {
        let err = from_json(r#"{"status": "SIDEWAYS"}"#).unwrap_err();
        assert!(matches!(err, HealthError::Serialization(_)));
        assert!(!err.is_validation());

        assert!(matches!(
            from_yaml("status: [").unwrap_err(),
            HealthError::Serialization(_)
        ));
    }

    #[test]
    fn test_serde_deserialize_still_validates() {
        let err = serde_json::from_str::<Health>(r#"{"status": "UP", "reason": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("Health UP must not have reason"));
    }

    #[test]
    fn test_parse_components_optional() {
        let health = from_json(r#"{"status": "UP"}"#).unwrap();
        assert_eq!(health.status(), HealthStatus::Up);
        assert!(health.is_leaf());
    }

    #[test]
    fn test_summary_entries_carry_node_status() {
        let health = Health::up()
            .with_component("DOWNLOADS", Health::up())
            .with_component("upstream", Health::down("gone").unwrap());

        let entries = health.summary_entries();
        assert_eq!(
            entries,
            vec![
                ("UP".to_string(), HealthStatus::Up),
                ("  DOWNLOADS: UP".to_string(), HealthStatus::Up),
                ("  upstream: DOWN: gone".to_string(), HealthStatus::Down),
            ]
        );
    }

    #[test]
    fn test_summary_lines() {
        let health = Health::up()
            .with_component(
                "hello",
                Health::up().with_component("connectivity", Health::down("timeout").unwrap()),
            )
            .with_component("cache", Health::up())
            .into_aggregated();

        assert_eq!(
            health.summary_lines(),
            vec![
                "DOWN: Component 'hello' is DOWN".to_string(),
                "  hello: DOWN: Component 'connectivity' is DOWN".to_string(),
                "    connectivity: DOWN: timeout".to_string(),
                "  cache: UP".to_string(),
            ]
        );
    }
}
