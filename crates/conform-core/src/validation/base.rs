//! Base validation trait and common utilities
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::coercion::{self, Coerced};
use crate::error::{Error, Result};
use crate::schema::{Schema, SchemaType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of validating one value against one schema
///
/// `valid` is true exactly when `errors` is empty. Each error names the
/// path of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A result with no violations
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from the collected violations
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Check whether any violation is reported at exactly `path`
    pub fn has_error_at(&self, path: &str) -> bool {
        self.errors
            .iter()
            .any(|error| error.strip_prefix(path).is_some_and(|rest| rest.starts_with(' ')))
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Location of the node being visited
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Dotted/bracketed path; empty at the root
    pub path: String,
    /// Nesting depth; zero at the root
    pub depth: usize,
}

impl ValidationContext {
    /// Create a context for the root node
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child context for an object field
    pub fn child<P: AsRef<str>>(&self, name: P) -> Self {
        let path = if self.path.is_empty() {
            name.as_ref().to_string()
        } else {
            format!("{}.{}", self.path, name.as_ref())
        };

        Self {
            path,
            depth: self.depth + 1,
        }
    }

    /// Create a child context for an array element
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            depth: self.depth + 1,
        }
    }
}

/// Common contract of the validator implementations
///
/// Implementations must be observably equivalent: for the same schema and
/// value they agree on validity and report the same violations.
pub trait SchemaValidator: Send + Sync {
    /// Short engine name used in logs and output
    fn name(&self) -> &'static str;

    /// Walk `value` against `schema`, collecting every violation
    fn validate_value(&self, schema: &Schema, value: &Value) -> ValidationResult;

    /// Parse `input` as JSON and validate it
    ///
    /// Malformed input fails with [`Error::Parse`]; a value that parses but
    /// violates the schema is an `Ok` result with `valid == false`.
    fn validate(&self, schema: &Schema, input: &str) -> Result<ValidationResult> {
        let value: Value = serde_json::from_str(input).map_err(Error::parse)?;
        Ok(self.validate_value(schema, &value))
    }

    /// Encode a typed value and validate the encoding
    fn validate_struct<T: Serialize>(&self, schema: &Schema, value: &T) -> Result<ValidationResult>
    where
        Self: Sized,
    {
        let encoded = serde_json::to_string(value).map_err(Error::encode)?;
        self.validate(schema, &encoded)
    }

    /// Coerce a value to a target type, optionally through a semantic format
    fn coerce(&self, target: SchemaType, value: &Value, format: Option<&str>) -> Option<Coerced> {
        coercion::coerce(target, value, format)
    }
}
