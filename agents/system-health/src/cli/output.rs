//! Output formatting for the System Health Agent CLI
//!
//! JSON and YAML emit the full structural tree; text is an indented,
//! colored summary for humans. Other documents (system info) are JSON or
//! YAML only.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use system_health_core::{render, Health, HealthStatus, OutputFormat};

use crate::error::{AgentError, Result};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum CliFormat {
    /// JSON format for machine processing
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// Human-readable tree with colors
    Text,
}

/// Output format options for structured documents
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

/// Render any serializable document
pub fn render_document<T: Serialize>(document: &T, format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        DocumentFormat::Yaml => Ok(serde_yaml::to_string(document)?),
    }
}

/// Render a health tree in the requested format
pub fn render_health(health: &Health, format: CliFormat) -> Result<String> {
    match format {
        CliFormat::Json => structural(health, OutputFormat::Json),
        CliFormat::Yaml => structural(health, OutputFormat::Yaml),
        CliFormat::Text => Ok(render_text(health)),
    }
}

fn structural(health: &Health, format: OutputFormat) -> Result<String> {
    render::render(health, format).map_err(|e| AgentError::Serialization(e.to_string()))
}

fn render_text(health: &Health) -> String {
    health
        .summary_entries()
        .into_iter()
        .map(|(line, status)| colorize(&line, status))
        .collect::<Vec<_>>()
        .join("\n")
}

fn colorize(line: &str, status: HealthStatus) -> String {
    match status {
        HealthStatus::Up => line.green().to_string(),
        HealthStatus::Down => line.red().to_string(),
    }
}
