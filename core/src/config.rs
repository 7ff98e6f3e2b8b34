use serde::Deserialize;
use std::path::Path;

use crate::error::DriverError;
use crate::target::{BuildSpec, EnvSource, Target};

pub const DEFAULT_TARGETS_FILE: &str = "cbd-targets.json";

#[derive(Debug, Deserialize)]
struct RawTarget {
    #[serde(default)]
    script: Option<Vec<String>>,
    #[serde(default)]
    env: Option<serde_json::Map<String, serde_json::Value>>,
    spec: RawSpec,
}

#[derive(Debug, Deserialize)]
struct RawSpec {
    options: serde_json::Map<String, serde_json::Value>,
    generator: String,
    build_dir: String,
}

pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<Vec<Target>, DriverError> {
    let expanded = shellexpand::tilde(&path.as_ref().to_string_lossy()).into_owned();
    let path = Path::new(&expanded);

    let content = std::fs::read_to_string(path).map_err(|source| DriverError::TableRead {
        path: path.display().to_string(),
        source,
    })?;

    parse_targets(&content)
}

pub fn parse_targets(content: &str) -> Result<Vec<Target>, DriverError> {
    let table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;

    let mut targets = Vec::with_capacity(table.len());
    for (name, value) in table {
        let raw: RawTarget = serde_json::from_value(value)
            .map_err(|err| DriverError::Configuration(format!("target {}: {}", name, err)))?;
        targets.push(convert(name, raw)?);
    }

    Ok(targets)
}

fn convert(name: String, raw: RawTarget) -> Result<Target, DriverError> {
    let env_source = match (raw.script, raw.env) {
        (Some(_), Some(_)) => {
            return Err(DriverError::Configuration(format!(
                "target {}: script and env are mutually exclusive",
                name
            )))
        }
        (None, None) => {
            return Err(DriverError::Configuration(format!(
                "target {}: one of script or env is required",
                name
            )))
        }
        (Some(command), None) => {
            if command.is_empty() {
                return Err(DriverError::Configuration(format!(
                    "target {}: script must not be empty",
                    name
                )));
            }
            EnvSource::ScriptCaptured { command }
        }
        (None, Some(overrides)) => EnvSource::Inline {
            overrides: string_pairs(&name, "env", overrides)?,
        },
    };

    let options = string_pairs(&name, "spec.options", raw.spec.options)?;

    Ok(Target {
        name,
        env_source,
        spec: BuildSpec {
            options,
            generator: raw.spec.generator,
            build_dir: raw.spec.build_dir,
        },
    })
}

fn string_pairs(
    target: &str,
    field: &str,
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<(String, String)>, DriverError> {
    map.into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(value) => Ok((key, value)),
            other => Err(DriverError::Configuration(format!(
                "target {}: {}.{} must be a string, got {}",
                target, field, key, other
            ))),
        })
        .collect()
}
