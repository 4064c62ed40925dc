//! JSON helpers shared by configuration entities
//!
//! Entities decode through "safe getters": a missing field or a field of the
//! wrong JSON type yields the field's default instead of an error. Only a
//! structurally wrong root is reported, via [`check_json_value_is_object`].

pub mod address;

use crate::error::ConfigError;
use serde_json::{Map, Value};

/// Name of a JSON value's type, for error messages and logs
pub fn json_type_name(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ensure `val` is a JSON object and return its fields
pub fn check_json_value_is_object<'a>(
    val: &'a Value,
    entity: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    val.as_object().ok_or_else(|| ConfigError::MalformedInput {
        entity: entity.to_string(),
        expected: "object",
        found: json_type_name(val),
    })
}

/// Ensure `val` is a JSON array and return its elements
pub fn check_json_value_is_array<'a>(
    val: &'a Value,
    entity: &str,
) -> Result<&'a [Value], ConfigError> {
    val.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConfigError::MalformedInput {
            entity: entity.to_string(),
            expected: "array",
            found: json_type_name(val),
        })
}

/// Field `key` of `obj`, or `Value::Null` when absent
pub fn get_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Value {
    obj.get(key).unwrap_or(&Value::Null)
}

/// String field `key`, or an empty string when absent or not a string
pub fn safe_get_string(obj: &Map<String, Value>, key: &str) -> String {
    safe_get_string_or(obj, key, "")
}

/// String field `key`, or `default` when absent or not a string
pub fn safe_get_string_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
