//! YAML parsing for manifests and test fixtures
//!
//! Bridges yaml-rust2 into `serde_json::Value` so YAML input can be
//! deserialized through the same serde types as JSON. Only the first
//! document of a multi-document stream is considered.

use serde_json::{Map, Number, Value};
use thiserror::Error;
use yaml_rust2::{Yaml, YamlLoader};

/// Error type for YAML parsing
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct YamlError(String);

/// Parse a YAML string into a `serde_json::Value`.
///
/// Returns `Value::Null` for empty input.
pub fn parse_yaml(input: &str) -> Result<Value, YamlError> {
    let docs = YamlLoader::load_from_str(input).map_err(|e| YamlError(e.to_string()))?;
    match docs.into_iter().next() {
        Some(doc) => to_json(doc),
        None => Ok(Value::Null),
    }
}

fn to_json(yaml: Yaml) -> Result<Value, YamlError> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Boolean(b) => Value::Bool(b),
        Yaml::Integer(i) => Value::Number(i.into()),
        Yaml::Real(s) => {
            let f: f64 = s.parse().map_err(|e| YamlError(format!("{e}: {s}")))?;
            Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Array(items) => {
            let values: Result<Vec<_>, _> = items.into_iter().map(to_json).collect();
            Value::Array(values?)
        }
        Yaml::Hash(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, value) in entries {
                let key = key_to_string(key)?;
                object.insert(key, to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Alias(_) => return Err(YamlError("YAML aliases not supported".to_string())),
        Yaml::BadValue => return Err(YamlError("bad YAML value".to_string())),
    })
}

fn key_to_string(key: Yaml) -> Result<String, YamlError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        other => Err(YamlError(format!("unsupported YAML key: {other:?}"))),
    }
}
