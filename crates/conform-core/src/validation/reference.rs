//! Reference validator
//!
//! A direct recursive descent over schema and value. Every node gets its
//! own owned path, user patterns are compiled on each use, and errors are
//! pushed into a fresh vector per call. It is the behavior the optimized
//! validator is measured against.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::base::{SchemaValidator, ValidationContext, ValidationResult};
use super::formats::BuiltinFormat;
use super::messages;
use super::ValidationConfig;
use crate::coercion::coerce_primitive;
use crate::registry::CustomValidatorRegistry;
use crate::schema::{Property, Schema, SchemaType};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Straightforward recursive-descent validator
#[derive(Debug, Clone)]
pub struct ReferenceValidator {
    config: ValidationConfig,
    registry: Arc<CustomValidatorRegistry>,
}

impl Default for ReferenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceValidator {
    /// Create a validator with the default configuration and the global registry
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            registry: CustomValidatorRegistry::global(),
        }
    }

    /// Resolve custom validators against `registry` instead of the global one
    pub fn with_registry(mut self, registry: Arc<CustomValidatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn validate_node(
        &self,
        node: &Property,
        value: &Value,
        context: &ValidationContext,
        errors: &mut Vec<String>,
    ) {
        if context.depth > self.config.max_depth {
            errors.push(messages::too_deep(&context.path, self.config.max_depth));
            return;
        }

        let Some(expected) = node.schema_type else {
            self.run_custom_validator(node, value, context, errors);
            return;
        };

        let coerced;
        let value = if expected.matches(value) {
            value
        } else {
            match self.coerce_mismatch(expected, value) {
                Some(converted) => {
                    coerced = converted;
                    &coerced
                }
                None => {
                    errors.push(messages::type_mismatch(&context.path, expected));
                    return;
                }
            }
        };

        match value {
            Value::Object(map) => self.validate_object(node, map, context, errors),
            Value::Array(items) => self.validate_array(node, items, context, errors),
            Value::String(s) => {
                if !self.validate_string(node, s, context, errors) {
                    return;
                }
            }
            Value::Number(_) => self.validate_number(node, value, context, errors),
            Value::Bool(_) | Value::Null => {}
        }

        self.run_custom_validator(node, value, context, errors);
    }

    fn coerce_mismatch(&self, expected: SchemaType, value: &Value) -> Option<Value> {
        if !self.config.coerce || !expected.is_primitive() {
            return None;
        }
        coerce_primitive(expected, value).filter(|converted| expected.matches(converted))
    }

    fn validate_object(
        &self,
        node: &Property,
        map: &Map<String, Value>,
        context: &ValidationContext,
        errors: &mut Vec<String>,
    ) {
        for name in &node.required {
            if !map.contains_key(name) {
                errors.push(messages::required(&context.child(name).path));
            }
        }

        for (name, property) in &node.properties {
            if let Some(field) = map.get(name) {
                self.validate_node(property, field, &context.child(name), errors);
            }
        }
    }

    fn validate_array(
        &self,
        node: &Property,
        items: &[Value],
        context: &ValidationContext,
        errors: &mut Vec<String>,
    ) {
        let Some(item_schema) = node.items.as_deref() else {
            return;
        };

        for (index, item) in items.iter().enumerate() {
            self.validate_node(item_schema, item, &context.child_index(index), errors);
        }
    }

    /// Returns false when the node's pattern does not compile, which ends
    /// validation of this node.
    fn validate_string(
        &self,
        node: &Property,
        s: &str,
        context: &ValidationContext,
        errors: &mut Vec<String>,
    ) -> bool {
        let path = &context.path;

        if let Some(min) = node.min_length {
            if s.len() < min {
                errors.push(messages::min_length(path, min));
            }
        }
        if let Some(max) = node.max_length {
            if s.len() > max {
                errors.push(messages::max_length(path, max));
            }
        }

        if let Some(pattern) = &node.pattern {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(s) {
                        errors.push(messages::pattern_mismatch(path, pattern));
                    }
                }
                Err(_) => {
                    errors.push(messages::invalid_pattern(path, pattern));
                    return false;
                }
            }
        }

        if !node.enum_values.is_empty() && !node.enum_values.iter().any(|allowed| allowed == s) {
            errors.push(messages::not_in_enum(path, &node.enum_values));
        }

        if let Some(format) = &node.format {
            match BuiltinFormat::from_name(format) {
                Some(builtin) => {
                    if !builtin.regex().is_match(s) {
                        errors.push(messages::invalid_format(path, builtin.name()));
                    }
                }
                None => errors.push(messages::unknown_format(path, format)),
            }
        }

        true
    }

    fn validate_number(
        &self,
        node: &Property,
        value: &Value,
        context: &ValidationContext,
        errors: &mut Vec<String>,
    ) {
        let Some(n) = value.as_f64() else {
            return;
        };

        if let Some(minimum) = node.minimum {
            if n < minimum {
                errors.push(messages::below_minimum(&context.path, minimum));
            }
        }
        if let Some(maximum) = node.maximum {
            if n > maximum {
                errors.push(messages::above_maximum(&context.path, maximum));
            }
        }
    }

    fn run_custom_validator(
        &self,
        node: &Property,
        value: &Value,
        context: &ValidationContext,
        errors: &mut Vec<String>,
    ) {
        let Some(name) = &node.custom_validator else {
            return;
        };

        match self.registry.lookup(name) {
            Some(validator) => errors.extend(validator(value, messages::display(&context.path))),
            None => errors.push(messages::unknown_validator(&context.path, name)),
        }
    }
}

impl SchemaValidator for ReferenceValidator {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn validate_value(&self, schema: &Schema, value: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        self.validate_node(schema.node(), value, &ValidationContext::new(), &mut errors);

        debug!(
            engine = self.name(),
            errors = errors.len(),
            "Validation complete"
        );
        ValidationResult::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    fn person_schema() -> Schema {
        Schema::object()
            .property("name", Property::string().min_length(2).max_length(20))
            .property("age", Property::integer().minimum(18.0).maximum(130.0))
            .property("email", Property::string().format("email"))
            .require("name")
            .require("age")
    }

    #[test]
    fn test_valid_object() {
        let validator = ReferenceValidator::new();
        let result = validator.validate_value(
            &person_schema(),
            &json!({"name": "Ada", "age": 36, "email": "ada@example.com"}),
        );
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_collects_all_errors() {
        let validator = ReferenceValidator::new();
        let result = validator.validate_value(
            &person_schema(),
            &json!({"name": "A", "email": "not-an-email"}),
        );

        assert_eq!(
            result.errors,
            vec![
                "age is required",
                "email must be a valid email",
                "name must be at least 2 characters",
            ]
        );
    }

    #[test]
    fn test_type_mismatch_does_not_cascade() {
        let validator = ReferenceValidator::new();
        let schema = Schema::object().property(
            "code",
            Property::string().min_length(5).pattern("^[A-Z]+$").format("email"),
        );

        let result = validator.validate_value(&schema, &json!({"code": 42}));
        assert_eq!(result.errors, vec!["code must be a string"]);
    }

    #[test]
    fn test_root_path_placeholder() {
        let validator = ReferenceValidator::new();
        let result = validator.validate_value(&Schema::object(), &json!([1, 2]));
        assert_eq!(result.errors, vec!["value must be an object"]);
    }

    #[test]
    fn test_fractional_integer_is_mismatch() {
        let validator = ReferenceValidator::new();
        let schema = Schema::of_type(SchemaType::Integer);
        assert!(validator.validate_value(&schema, &json!(30.0)).is_valid());
        assert_eq!(
            validator.validate_value(&schema, &json!(30.5)).errors,
            vec!["value must be an integer"]
        );
    }

    #[test]
    fn test_invalid_pattern_skips_remaining_checks() {
        let validator = ReferenceValidator::new();
        let schema = Schema::object()
            .property(
                "slug",
                Property::string().pattern("([a-z]").enum_values(["x"]).format("uri"),
            )
            .property("title", Property::string().min_length(3));

        let result = validator.validate_value(&schema, &json!({"slug": "abc", "title": "ab"}));
        assert_eq!(
            result.errors,
            vec![
                "slug has an invalid pattern '([a-z]'",
                "title must be at least 3 characters",
            ]
        );
    }

    #[test]
    fn test_unknown_format() {
        let validator = ReferenceValidator::new();
        let schema = Schema::object().property("zip", Property::string().format("postal-code"));
        let result = validator.validate_value(&schema, &json!({"zip": "12345"}));
        assert_eq!(result.errors, vec!["zip has unknown format 'postal-code'"]);
    }

    #[test]
    fn test_custom_validators() {
        let registry = Arc::new(CustomValidatorRegistry::with_defaults());
        let validator = ReferenceValidator::new().with_registry(Arc::clone(&registry));
        let schema = Schema::object()
            .property("handle", Property::string().custom_validator("alphanumeric"))
            .property("count", Property::integer().custom_validator("positive"))
            .property("other", Property::string().custom_validator("missing"));

        let result = validator.validate_value(
            &schema,
            &json!({"handle": "ada lovelace", "count": 0, "other": "x"}),
        );
        assert_eq!(
            result.errors,
            vec![
                "count must be positive",
                "handle must contain only letters and digits",
                "other references unknown custom validator 'missing'",
            ]
        );
    }

    #[test]
    fn test_custom_validator_runs_on_untyped_node() {
        let registry = Arc::new(CustomValidatorRegistry::with_defaults());
        let validator = ReferenceValidator::new().with_registry(registry);
        let schema = Schema::new().with_node(Property::any().custom_validator("nonEmpty"));

        assert_eq!(
            validator.validate_value(&schema, &json!("")).errors,
            vec!["value must not be empty"]
        );
    }

    #[test]
    fn test_coercion_mode() {
        let schema = Schema::object()
            .property("age", Property::integer().minimum(18.0))
            .property("active", Property::boolean());
        let value = json!({"age": "16", "active": "yes"});

        let strict = ReferenceValidator::new().validate_value(&schema, &value);
        assert_eq!(
            strict.errors,
            vec!["active must be a boolean", "age must be an integer"]
        );

        let coercing = ReferenceValidator::with_config(ValidationConfig::coercing())
            .validate_value(&schema, &value);
        assert_eq!(coercing.errors, vec!["age must be at least 18"]);
    }

    #[test]
    fn test_depth_limit() {
        let mut node = Property::string();
        for _ in 0..5 {
            node = Property::object().property("next", node);
        }
        let schema = Schema::from(node);
        let value = json!({"next": {"next": {"next": {"next": {"next": "end"}}}}});

        let validator =
            ReferenceValidator::with_config(ValidationConfig::default().with_max_depth(3));
        assert_eq!(
            validator.validate_value(&schema, &value).errors,
            vec!["next.next.next.next exceeds maximum nesting depth of 3"]
        );
        assert!(ReferenceValidator::new().validate_value(&schema, &value).is_valid());
    }

    #[test]
    fn test_parse_error_is_distinct() {
        let validator = ReferenceValidator::new();
        let error = validator.validate(&person_schema(), "{\"name\": ").unwrap_err();
        assert!(error.is_parse());
    }

    #[test]
    fn test_validate_struct() {
        #[derive(Serialize)]
        struct Person {
            name: String,
            age: u32,
        }

        let validator = ReferenceValidator::new();
        let result = validator
            .validate_struct(
                &person_schema(),
                &Person {
                    name: "Grace".to_string(),
                    age: 12,
                },
            )
            .unwrap();
        assert_eq!(result.errors, vec!["age must be at least 18"]);
    }
}
