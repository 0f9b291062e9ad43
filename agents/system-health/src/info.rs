//! System information
//!
//! Package, runtime and settings details for operators, optionally with the
//! process environment. Values under secret-looking keys are replaced with
//! [`REDACTED`] unless filtering is switched off.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::{Settings, REDACTED};
use crate::error::Result;
use crate::AGENT_VERSION;

/// Key fragments that mark a value as secret (matched case-insensitively)
const SENSITIVE_KEYS: [&str; 5] = ["password", "secret", "token", "key", "credential"];

/// What to put into the info document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoOptions {
    /// Include the process environment under `runtime.environ`
    pub include_environ: bool,
    /// Redact values under secret-looking keys
    pub filter_secrets: bool,
}

impl Default for InfoOptions {
    fn default() -> Self {
        Self {
            include_environ: false,
            filter_secrets: true,
        }
    }
}

#[derive(Serialize)]
struct SystemInfo<'a> {
    package: PackageInfo,
    runtime: RuntimeInfo<'a>,
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct RuntimeInfo<'a> {
    environment: &'a str,
    os: &'static str,
    arch: &'static str,
    settings: SettingsView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environ: Option<BTreeMap<String, String>>,
}

#[derive(Serialize)]
struct SettingsView<'a> {
    connectivity_url: &'a str,
    probe_timeout_ms: u64,
    log_level: &'a str,
    log_format: &'static str,
    system_token: Option<&'a str>,
}

/// Build the info document for the current process
pub fn system_info(settings: &Settings, options: InfoOptions) -> Result<Value> {
    let environ = options
        .include_environ
        .then(|| std::env::vars().collect::<BTreeMap<_, _>>());
    build_info(settings, options, environ)
}

fn build_info(
    settings: &Settings,
    options: InfoOptions,
    environ: Option<BTreeMap<String, String>>,
) -> Result<Value> {
    let info = SystemInfo {
        package: PackageInfo {
            name: env!("CARGO_PKG_NAME"),
            version: AGENT_VERSION,
        },
        runtime: RuntimeInfo {
            environment: &settings.environment,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            settings: SettingsView {
                connectivity_url: &settings.connectivity_url,
                probe_timeout_ms: settings.probe_timeout.as_millis() as u64,
                log_level: &settings.log_level,
                log_format: settings.log_format.as_str(),
                system_token: settings.system_token.as_deref(),
            },
            environ,
        },
    };

    let value = serde_json::to_value(info)?;
    Ok(if options.filter_secrets {
        redact_secrets(value)
    } else {
        value
    })
}

/// Replace non-empty string and number values under sensitive keys,
/// walking nested objects and arrays
pub fn redact_secrets(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, val)| {
                    let val = if is_sensitive(&key) && has_secret(&val) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_secrets(val)
                    };
                    (key, val)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(redact_secrets).collect()),
        other => other,
    }
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEYS.iter().any(|s| key.contains(s))
}

fn has_secret(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
        _ => false,
    }
}
