//! Coercion library
//!
//! Best-effort conversions from a decoded JSON value to a primitive or
//! semantic type. Every function returns `Option`: `None` means the value
//! could not be converted, which is an ordinary outcome rather than an error.
//!
//! The library is organized into:
//! - `primitive`: string, integer, number, and boolean conversions
//! - `format`: semantic conversions (date-time, UUID, email, URL, duration,
//!   IP address, base64, hostname)
//! - `container`: JSON text, array, and object conversions
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod container;
pub mod format;
pub mod primitive;

pub use container::{to_array, to_json, to_object};
pub use format::{
    to_base64, to_date, to_datetime, to_duration, to_email, to_hostname, to_ip, to_ipv4,
    to_ipv6, to_url, to_uuid, SemanticFormat,
};
pub use primitive::{format_number, to_boolean, to_integer, to_number, to_string};

use crate::schema::{Property, SchemaType};
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// The outcome of a successful coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// A primitive, container, or canonical string result
    Json(Value),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Uuid(Uuid),
    /// Address-only form of an email address
    Email(String),
    /// Parsed URL and its canonical text
    Url { url: Url, text: String },
    Duration(Duration),
    Ip(IpAddr),
    Bytes(Vec<u8>),
    Hostname(String),
}

impl Coerced {
    /// Canonical textual form of the coerced value
    ///
    /// Coercing this string again with the same format yields the same
    /// value, and coercing it as a string returns it unchanged.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Coerced::Json(Value::String(s)) => s.clone(),
            Coerced::Json(Value::Number(n)) => primitive::number_to_string(n),
            Coerced::Json(other) => other.to_string(),
            Coerced::DateTime(dt) => format_datetime(dt),
            Coerced::Date(date) => date.format("%Y-%m-%d").to_string(),
            Coerced::Uuid(uuid) => uuid.hyphenated().to_string(),
            Coerced::Email(address) => address.clone(),
            Coerced::Url { text, .. } => text.clone(),
            Coerced::Duration(duration) => humantime::format_duration(*duration).to_string(),
            Coerced::Ip(ip) => ip.to_string(),
            Coerced::Bytes(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
            Coerced::Hostname(host) => host.clone(),
        }
    }

    /// Convert into a JSON value; semantic values become their canonical string
    pub fn into_value(self) -> Value {
        match self {
            Coerced::Json(value) => value,
            other => Value::String(other.to_canonical_string()),
        }
    }
}

/// RFC 3339 in UTC with the fraction trimmed to its significant digits
fn format_datetime(dt: &DateTime<Utc>) -> String {
    let text = dt.to_rfc3339_opts(SecondsFormat::Nanos, true);
    match text.split_once('.') {
        Some((whole, fraction)) => {
            let digits = fraction.trim_end_matches('Z').trim_end_matches('0');
            if digits.is_empty() {
                format!("{}Z", whole)
            } else {
                format!("{}.{}Z", whole, digits)
            }
        }
        None => text,
    }
}

/// Coerce a value to a target type, optionally through a semantic format
///
/// With a recognized `format` the semantic conversion runs first: a `string`
/// target receives the canonical string of the semantic value, any other
/// target receives the semantic value itself. Without a recognized format
/// the primitive conversion for `target` runs.
pub fn coerce(target: SchemaType, value: &Value, format: Option<&str>) -> Option<Coerced> {
    if let Some(semantic) = format.and_then(SemanticFormat::parse) {
        let coerced = semantic.coerce(value)?;
        return Some(match target {
            SchemaType::String => Coerced::Json(Value::String(coerced.to_canonical_string())),
            _ => coerced,
        });
    }

    coerce_primitive(target, value).map(Coerced::Json)
}

/// Coerce a value through a named semantic format
///
/// Returns `None` for unrecognized format names as well as failed conversions.
pub fn coerce_format(format: &str, value: &Value) -> Option<Coerced> {
    SemanticFormat::parse(format)?.coerce(value)
}

/// Coerce a value to the JSON representation of a schema type
pub fn coerce_primitive(target: SchemaType, value: &Value) -> Option<Value> {
    match target {
        SchemaType::String => to_string(value).map(Value::String),
        SchemaType::Integer => to_integer(value).map(Value::from),
        SchemaType::Number => to_number(value).map(Value::from),
        SchemaType::Boolean => to_boolean(value).map(Value::Bool),
        SchemaType::Object => to_object(value).map(Value::Object),
        SchemaType::Array => to_array(value).map(Value::Array),
    }
}

/// Return a copy of `value` with mismatched primitives coerced to their declared type
///
/// Nodes that already match, nodes that fail to coerce, and fields the
/// schema does not declare are copied unchanged.
pub fn coerce_to_schema(node: &Property, value: &Value) -> Value {
    let Some(schema_type) = node.schema_type else {
        return value.clone();
    };

    if !schema_type.matches(value) {
        if schema_type.is_primitive() {
            return coerce_primitive(schema_type, value).unwrap_or_else(|| value.clone());
        }
        return value.clone();
    }

    match value {
        Value::Object(map) => {
            let mut coerced = map.clone();
            for (name, property) in &node.properties {
                if let Some(field) = map.get(name) {
                    coerced.insert(name.clone(), coerce_to_schema(property, field));
                }
            }
            Value::Object(coerced)
        }
        Value::Array(items) => match node.items.as_deref() {
            Some(item_schema) => Value::Array(
                items
                    .iter()
                    .map(|item| coerce_to_schema(item_schema, item))
                    .collect(),
            ),
            None => value.clone(),
        },
        _ => value.clone(),
    }
}
