//! Schema data types
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Primitive kind a schema node expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    /// The keyword used in serialized schemas
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }

    /// The type name with its indefinite article, as used in messages
    pub fn with_article(&self) -> &'static str {
        match self {
            SchemaType::String => "a string",
            SchemaType::Integer => "an integer",
            SchemaType::Number => "a number",
            SchemaType::Boolean => "a boolean",
            SchemaType::Object => "an object",
            SchemaType::Array => "an array",
        }
    }

    /// Whether values of this kind are scalars that coercion can convert
    pub fn is_primitive(&self) -> bool {
        !matches!(self, SchemaType::Object | SchemaType::Array)
    }

    /// Check the runtime kind of a decoded value against this type
    ///
    /// Integers are numbers without a fractional component, so `30.0`
    /// satisfies `integer` while `30.5` does not.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (SchemaType::String, Value::String(_)) => true,
            (SchemaType::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            (SchemaType::Number, Value::Number(_)) => true,
            (SchemaType::Boolean, Value::Bool(_)) => true,
            (SchemaType::Object, Value::Object(_)) => true,
            (SchemaType::Array, Value::Array(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(SchemaType::String),
            "integer" => Ok(SchemaType::Integer),
            "number" => Ok(SchemaType::Number),
            "boolean" => Ok(SchemaType::Boolean),
            "object" => Ok(SchemaType::Object),
            "array" => Ok(SchemaType::Array),
            other => Err(format!("unknown schema type '{}'", other)),
        }
    }
}

/// Constraint bundle for one field, array element, or the root node
///
/// Which constraints apply is decided by `schema_type`: string bounds are
/// ignored on numbers, numeric bounds on strings, and so on. Every bound is
/// optional so that an absent bound is never mistaken for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Expected kind; `None` leaves the node unconstrained
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Semantic refinement of a string (`email`, `uri`, `date-time`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    /// Minimum string length in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum string length in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Regular expression a string must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Allowed string values, in declaration order
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// Shape of each array element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,

    /// Nested object fields
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,

    /// Names that must be present in a nested object
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Name of a validator in the custom validator registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_validator: Option<String>,
}

/// Root type descriptor
///
/// The root node's own constraints are flattened in from [`Property`], so a
/// schema document reads exactly like a property document with a few extra
/// keywords. The conditional keywords are kept for round-tripping schema
/// documents but are not evaluated by the validators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(flatten)]
    pub node: Property,

    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub if_schema: Option<Box<Schema>>,

    #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
    pub then_schema: Option<Box<Schema>>,

    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_schema: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,
}

impl Schema {
    /// The root node the validators walk
    pub fn node(&self) -> &Property {
        &self.node
    }

    /// Expected kind of the root value
    pub fn schema_type(&self) -> Option<SchemaType> {
        self.node.schema_type
    }

    /// Whether the schema declares any conditional keywords
    pub fn has_conditionals(&self) -> bool {
        self.if_schema.is_some()
            || self.then_schema.is_some()
            || self.else_schema.is_some()
            || !self.all_of.is_empty()
            || !self.any_of.is_empty()
            || !self.one_of.is_empty()
            || self.not.is_some()
    }
}

impl From<Property> for Schema {
    fn from(node: Property) -> Self {
        Self {
            node,
            ..Self::default()
        }
    }
}
