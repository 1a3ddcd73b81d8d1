//! JSON → record mapping.
//!
//! Each record's field table is its serde attributes: `rename`/`rename_all`
//! bind JSON keys to fields, `#[serde(default)]` fills keys the API omitted,
//! and unknown keys are ignored. Keys sent as explicit `null` are treated as
//! absent. [`ResponseMapper`] adds a runtime rename table on top for keys
//! that drift between API versions.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::QiwiError;

const MAX_SHAPE_KEYS: usize = 8;

/// Short human-readable description of a JSON value's shape.
pub fn shape_of(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => {
            let kinds: Vec<&str> = items.iter().take(MAX_SHAPE_KEYS).map(kind_of).collect();
            let more = if items.len() > MAX_SHAPE_KEYS { ", ..." } else { "" };
            format!("array of {} [{}{more}]", items.len(), kinds.join(", "))
        }
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().take(MAX_SHAPE_KEYS).map(String::as_str).collect();
            let more = if map.len() > MAX_SHAPE_KEYS { ", ..." } else { "" };
            format!("object {{{}{more}}}", keys.join(", "))
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mapping_error<T>(value: &Value, reason: impl Into<String>) -> QiwiError {
    let err = QiwiError::Mapping {
        expected: std::any::type_name::<T>(),
        shape: shape_of(value),
        reason: reason.into(),
    };
    warn!(error = %err, "response mapping failed");
    err
}

/// Maps JSON payloads into records, optionally renaming keys first.
#[derive(Debug, Clone, Default)]
pub struct ResponseMapper {
    renames: Vec<(String, String)>,
}

impl ResponseMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the record key `record_key` from the JSON key `json_key`.
    ///
    /// If the object already carries `record_key`, that value wins.
    pub fn with_rename(mut self, json_key: impl Into<String>, record_key: impl Into<String>) -> Self {
        self.renames.push((json_key.into(), record_key.into()));
        self
    }

    /// Map a single JSON object into `T`.
    pub fn map_record<T: DeserializeOwned>(&self, value: Value) -> Result<T, QiwiError> {
        match value {
            Value::Object(map) => self.map_object(map),
            other => Err(mapping_error::<T>(&other, "expected a JSON object")),
        }
    }

    /// Map an array of JSON objects into records, preserving order.
    ///
    /// A lone object is accepted and yields a single record.
    pub fn map_records<T: DeserializeOwned>(&self, value: Value) -> Result<Vec<T>, QiwiError> {
        match value {
            Value::Array(items) => {
                if let Some(pos) = items.iter().position(|v| !v.is_object()) {
                    let shape = Value::Array(items);
                    return Err(mapping_error::<Vec<T>>(
                        &shape,
                        format!("element {pos} is not a JSON object"),
                    ));
                }
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .map(|map| self.map_object(map))
                    .collect()
            }
            Value::Object(map) => Ok(vec![self.map_object(map)?]),
            other => Err(mapping_error::<Vec<T>>(
                &other,
                "expected a JSON object or an array of objects",
            )),
        }
    }

    fn map_object<T: DeserializeOwned>(&self, mut map: Map<String, Value>) -> Result<T, QiwiError> {
        for (json_key, record_key) in &self.renames {
            if map.contains_key(record_key) {
                continue;
            }
            if let Some(v) = map.remove(json_key) {
                map.insert(record_key.clone(), v);
            }
        }
        let raw = Value::Object(map);
        <T as serde::Deserialize>::deserialize(&strip_nulls(raw.clone()))
            .map_err(|e| mapping_error::<T>(&raw, e.to_string()))
    }
}

/// Map a single JSON object into `T` with no renames.
pub fn map_record<T: DeserializeOwned>(value: Value) -> Result<T, QiwiError> {
    ResponseMapper::default().map_record(value)
}

/// Map a JSON array of objects into `Vec<T>` with no renames.
pub fn map_records<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, QiwiError> {
    ResponseMapper::default().map_records(value)
}

/// Drop every `null`-valued key, recursively.
pub(crate) fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Take a nested collection out of an envelope object, e.g. `data` in `{"data": [...]}`.
///
/// A missing or null key yields an empty array.
pub fn take_collection(value: Value, key: &str) -> Result<Value, QiwiError> {
    match value {
        Value::Object(mut map) => match map.remove(key) {
            None | Some(Value::Null) => Ok(Value::Array(Vec::new())),
            Some(v) => Ok(v),
        },
        other => Err(QiwiError::Mapping {
            expected: "envelope object",
            shape: shape_of(&other),
            reason: format!("expected an object with a `{key}` field"),
        }),
    }
}
