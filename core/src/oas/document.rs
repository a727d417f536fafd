#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads YAML or JSON documents into `serde_json::Value`, preserving key order.

use crate::error::{AppError, AppResult};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use url::Url;

/// Parses document text. JSON is tried when the text looks like JSON, YAML otherwise.
pub fn parse_document_str(content: &str) -> AppResult<Value> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str::<Value>(content) {
            return Ok(value);
        }
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse document: {}", e)))?;
    yaml_to_json(yaml)
}

/// Fetches and parses a remote document over HTTP(S).
///
/// Transport failures and non-success statuses are resolution errors.
#[cfg(feature = "client")]
pub fn fetch_document(url: &Url) -> AppResult<Value> {
    let fetch_err = |e: ureq::Error| AppError::Resolution(format!("Failed to fetch {}: {}", url, e));

    let mut response = ureq::get(url.as_str()).call().map_err(fetch_err)?;
    let body = response.body_mut().read_to_string().map_err(fetch_err)?;
    tracing::debug!("Fetched {} ({} bytes)", url, body.len());
    parse_document_str(&body)
}

/// Remote documents need the `client` feature.
#[cfg(not(feature = "client"))]
pub fn fetch_document(url: &Url) -> AppResult<Value> {
    Err(AppError::Resolution(format!(
        "Cannot fetch {}: built without the `client` feature",
        url
    )))
}

/// Reads and parses a document from disk.
pub fn read_document(path: &Path) -> AppResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Resolution(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| {
            AppError::Parse(format!("Failed to parse {}: {}", path.display(), e))
        })
    } else {
        parse_document_str(&content)
    }
}

/// Converts YAML into JSON.
///
/// YAML allows non-string keys (`200:` for status codes); they are stringified.
fn yaml_to_json(value: serde_yaml::Value) -> AppResult<Value> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n)?,
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<AppResult<Vec<_>>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, val) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(val)?);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> AppResult<Value> {
    if let Some(i) = n.as_i64() {
        Ok(Value::Number(i.into()))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::Number(u.into()))
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| AppError::Parse(format!("Unsupported YAML number: {}", n)))
    }
}

fn yaml_key(key: serde_yaml::Value) -> AppResult<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        other => Err(AppError::Parse(format!(
            "Unsupported mapping key in document: {:?}",
            other
        ))),
    }
}
