//! Integration tests for health tree aggregation
//!
//! Covers the concrete scenarios consumers rely on:
//! - Reason wording for one and several DOWN components
//! - Propagation through nested subsystems
//! - Authoritative DOWN nodes
//! - Round-trip through the structural form

use system_health_core::render::{from_json, from_yaml, to_json_pretty, to_yaml};
use system_health_core::{Components, Health, HealthError, HealthStatus};

const DB_FAILURE: &str = "DB failure";

fn down(reason: &str) -> Health {
    Health::down(reason).unwrap()
}

#[test]
fn test_up_without_components() {
    let mut health = Health::up();
    let result = health.compute_health_from_components();

    assert_eq!(result.status(), HealthStatus::Up);
    assert!(result.reason().is_none());
}

#[test]
fn test_single_component_down() {
    let mut health = Health::up();
    let mut components = Components::new();
    components.insert("database".to_string(), down(DB_FAILURE));
    components.insert("cache".to_string(), Health::up());
    health.set_components(components).unwrap();

    let result = health.compute_health_from_components();

    assert_eq!(result.status(), HealthStatus::Down);
    assert_eq!(result.reason(), Some("Component 'database' is DOWN"));
}

#[test]
fn test_multiple_components_down() {
    let mut health = Health::up()
        .with_component("database", down(DB_FAILURE))
        .with_component("cache", down("Cache failure"))
        .with_component("api", Health::up());

    let result = health.compute_health_from_components();

    assert_eq!(result.status(), HealthStatus::Down);
    let reason = result.reason().unwrap();
    assert!(reason.starts_with("Components '"));
    assert!(reason.contains("'database'"));
    assert!(reason.contains("'cache'"));
    assert!(reason.contains("are DOWN"));
    // insertion order decides the listing
    assert_eq!(reason, "Components 'database', 'cache' are DOWN");
}

#[test]
fn test_nested_propagation() {
    let mid = Health::up().with_component("deep", down("Deep failure"));
    let mut health = Health::up()
        .with_component("mid", mid)
        .with_component("other", Health::up());

    health.compute_health_from_components();

    assert!(health.is_down());
    assert_eq!(health.reason(), Some("Component 'mid' is DOWN"));

    let mid = health.component("mid").unwrap();
    assert!(mid.is_down());
    assert_eq!(mid.reason(), Some("Component 'deep' is DOWN"));

    let deep = mid.component("deep").unwrap();
    assert_eq!(deep.reason(), Some("Deep failure"));

    assert!(health.component("other").unwrap().is_up());
}

#[test]
fn test_authoritative_down_kept() {
    let mut health = down("Original failure");
    let mut components = Components::new();
    components.insert("database".to_string(), down(DB_FAILURE));
    components.insert("cache".to_string(), Health::up());
    health.set_components(components).unwrap();

    let result = health.compute_health_from_components();

    assert_eq!(result.status(), HealthStatus::Down);
    assert_eq!(result.reason(), Some("Original failure"));
}

#[test]
fn test_authoritative_down_with_up_subtree() {
    let health = down("Maintenance")
        .with_component("database", Health::up())
        .into_aggregated();

    assert_eq!(health.reason(), Some("Maintenance"));
    assert!(health.component("database").unwrap().is_up());
}

#[test]
fn test_complex_tree() {
    let services = Health::up()
        .with_component("auth", down("Auth error"))
        .with_component("storage", Health::up());
    let health = Health::up()
        .with_component("database", Health::up())
        .with_component("services", services)
        .with_component("monitoring", Health::up())
        .into_aggregated();

    assert!(health.is_down());
    assert_eq!(health.reason(), Some("Component 'services' is DOWN"));

    let services = health.component("services").unwrap();
    assert_eq!(services.reason(), Some("Component 'auth' is DOWN"));
    assert!(services.component("storage").unwrap().is_up());
    assert!(health.component("database").unwrap().is_up());
    assert!(health.component("monitoring").unwrap().is_up());
}

#[test]
fn test_construction_failures() {
    let err = Health::new(HealthStatus::Down, None, Components::new()).unwrap_err();
    assert_eq!(err, HealthError::DownWithoutReason);
    assert!(err.to_string().contains("Health DOWN must have a reason"));

    let err = Health::new(HealthStatus::Up, Some("x".to_string()), Components::new()).unwrap_err();
    assert_eq!(err, HealthError::UpWithReason);
    assert!(err.to_string().contains("Health UP must not have reason"));
}

#[test]
fn test_idempotent() {
    let mut health = Health::up()
        .with_component("database", down(DB_FAILURE))
        .with_component(
            "services",
            Health::up().with_component("auth", down("Auth error")),
        );

    health.compute_health_from_components();
    let once = health.clone();
    health.compute_health_from_components();

    assert_eq!(health, once);
}

#[test]
fn test_json_round_trip_then_aggregate() {
    let original = Health::up()
        .with_component("hello", Health::up().with_component("connectivity", down("Unexpected response status: 404")))
        .with_component("cache", Health::up());

    let aggregated = original.clone().into_aggregated();

    let parsed = from_json(&to_json_pretty(&original).unwrap()).unwrap();
    assert_eq!(parsed.into_aggregated(), aggregated);

    let parsed = from_json(&to_json_pretty(&aggregated).unwrap()).unwrap();
    assert_eq!(parsed.into_aggregated(), aggregated);
}

#[test]
fn test_yaml_round_trip() {
    let tree = Health::up()
        .with_component("database", down(DB_FAILURE))
        .into_aggregated();

    let parsed = from_yaml(&to_yaml(&tree).unwrap()).unwrap();

    assert_eq!(parsed, tree);
    assert_eq!(parsed.to_string(), "DOWN: Component 'database' is DOWN");
}
