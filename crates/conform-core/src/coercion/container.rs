//! JSON text, array, and object coercions
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

/// Decode JSON text; values that are already decoded pass through
pub fn to_json(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => serde_json::from_str(s.trim()).ok(),
        other => Some(other.clone()),
    }
}

/// Coerce to an array
///
/// Strings are decoded as a JSON array when possible and otherwise split on
/// commas. Any other scalar is wrapped as a single element.
pub fn to_array(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(s) => {
            if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(s.trim()) {
                return Some(items);
            }
            Some(
                s.split(',')
                    .map(|part| Value::String(part.trim().to_string()))
                    .collect(),
            )
        }
        Value::Null | Value::Object(_) => None,
        scalar => Some(vec![scalar.clone()]),
    }
}

/// Coerce to an object; only objects and JSON object text convert
pub fn to_object(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s.trim()) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}
