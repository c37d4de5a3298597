//! Schema model
//!
//! A [`Schema`] is an immutable tree describing the expected shape of a
//! value. Schemas are built by hand with the builder helpers, or loaded from
//! JSON/YAML documents using JSON-Schema-style keywords:
//!
//! ```rust
//! use conform_core::schema::Schema;
//!
//! let schema = Schema::from_json_str(r#"{
//!     "type": "object",
//!     "properties": {"age": {"type": "integer", "minimum": 18}},
//!     "required": ["age"]
//! }"#).unwrap();
//!
//! assert_eq!(schema.node.required, vec!["age"]);
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod types;

pub use types::{Property, Schema, SchemaType};

use crate::error::{Error, Result};
use serde_json::Value;

impl Schema {
    /// Load a schema from a JSON document
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| Error::schema("malformed JSON schema document", e))
    }

    /// Load a schema from a YAML document
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| Error::schema("malformed YAML schema document", e))
    }

    /// Build a schema from an already decoded document
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::schema("malformed schema document", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_yaml() {
        let schema = Schema::from_yaml_str(
            r#"
type: object
properties:
  name:
    type: string
    minLength: 2
  tags:
    type: array
    items:
      type: string
      enum: [red, green]
required: [name]
"#,
        )
        .unwrap();

        assert_eq!(schema.schema_type(), Some(SchemaType::Object));
        assert_eq!(schema.node.properties["name"].min_length, Some(2));
        let tags = &schema.node.properties["tags"];
        assert_eq!(tags.items.as_ref().unwrap().enum_values, vec!["red", "green"]);
    }

    #[test]
    fn test_from_value_round_trip() {
        let document = json!({
            "type": "object",
            "properties": {
                "score": {"type": "number", "minimum": 0.5, "maximum": 10}
            },
            "required": ["score"]
        });

        let schema = Schema::from_value(document.clone()).unwrap();
        assert_eq!(schema.node.properties["score"].maximum, Some(10.0));

        let reloaded = Schema::from_value(serde_json::to_value(&schema).unwrap()).unwrap();
        assert_eq!(reloaded, schema);
    }

    #[test]
    fn test_unknown_type_is_schema_error() {
        let error = Schema::from_json_str(r#"{"type": "decimal"}"#).unwrap_err();
        assert!(matches!(error, Error::Schema { .. }));
    }
}
