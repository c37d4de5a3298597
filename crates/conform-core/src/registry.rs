//! Custom validator registry
//!
//! A schema node can name a custom validator through `customValidator`. The
//! validators resolve that name against a [`CustomValidatorRegistry`]; a name
//! that is not registered produces a validation error at the node instead of
//! silently skipping the check.
//!
//! Registration is expected to happen before validation begins. The
//! process-wide registry returned by [`CustomValidatorRegistry::global`] is
//! created with the standard validators on first use.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::schema::SchemaType;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A custom validation function
///
/// Receives the value at the node and its display path, and returns the
/// violations it found in order. An empty list means the value passed.
pub type CustomValidatorFn = Arc<dyn Fn(&Value, &str) -> Vec<String> + Send + Sync>;

/// Names of the validators installed by [`CustomValidatorRegistry::with_defaults`]
pub const STANDARD_VALIDATORS: &[&str] = &[
    "nonEmpty",
    "alphanumeric",
    "noWhitespace",
    "positive",
    "nonNegative",
];

/// Concurrency-safe mapping from validator name to validation function
#[derive(Default)]
pub struct CustomValidatorRegistry {
    validators: RwLock<HashMap<String, CustomValidatorFn>>,
}

impl CustomValidatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            validators: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the standard validators
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register("nonEmpty", non_empty);
        registry.register("alphanumeric", alphanumeric);
        registry.register("noWhitespace", no_whitespace);
        registry.register("positive", positive);
        registry.register("nonNegative", non_negative);
        registry
    }

    /// The process-wide registry, created with the standard validators on first use
    pub fn global() -> Arc<CustomValidatorRegistry> {
        static GLOBAL: OnceLock<Arc<CustomValidatorRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::with_defaults())))
    }

    /// Register a validator, replacing any existing one with the same name
    pub fn register<F>(&self, name: impl Into<String>, validator: F)
    where
        F: Fn(&Value, &str) -> Vec<String> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(validator = %name, "Registering custom validator");
        self.validators.write().insert(name, Arc::new(validator));
    }

    /// Look up a validator by name
    pub fn lookup(&self, name: &str) -> Option<CustomValidatorFn> {
        self.validators.read().get(name).cloned()
    }

    /// Check if a validator is registered
    pub fn contains(&self, name: &str) -> bool {
        self.validators.read().contains_key(name)
    }

    /// Registered validator names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered validators
    pub fn len(&self) -> usize {
        self.validators.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.validators.read().is_empty()
    }
}

impl fmt::Debug for CustomValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}

/// Register a validator on the process-wide registry
pub fn register_global<F>(name: impl Into<String>, validator: F)
where
    F: Fn(&Value, &str) -> Vec<String> + Send + Sync + 'static,
{
    CustomValidatorRegistry::global().register(name, validator);
}

fn kind_error(path: &str, expected: SchemaType) -> Vec<String> {
    vec![format!("{} must be {}", path, expected.with_article())]
}

fn non_empty(value: &Value, path: &str) -> Vec<String> {
    let empty = match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    };

    if empty {
        vec![format!("{} must not be empty", path)]
    } else {
        Vec::new()
    }
}

fn alphanumeric(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(s) if s.chars().all(|c| c.is_ascii_alphanumeric()) => Vec::new(),
        Value::String(_) => vec![format!("{} must contain only letters and digits", path)],
        _ => kind_error(path, SchemaType::String),
    }
}

fn no_whitespace(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(s) if s.chars().any(char::is_whitespace) => {
            vec![format!("{} must not contain whitespace", path)]
        }
        Value::String(_) => Vec::new(),
        _ => kind_error(path, SchemaType::String),
    }
}

fn positive(value: &Value, path: &str) -> Vec<String> {
    match value.as_f64() {
        Some(n) if n > 0.0 => Vec::new(),
        Some(_) => vec![format!("{} must be positive", path)],
        None => kind_error(path, SchemaType::Number),
    }
}

fn non_negative(value: &Value, path: &str) -> Vec<String> {
    match value.as_f64() {
        Some(n) if n >= 0.0 => Vec::new(),
        Some(_) => vec![format!("{} must not be negative", path)],
        None => kind_error(path, SchemaType::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_installed() {
        let registry = CustomValidatorRegistry::with_defaults();
        assert_eq!(registry.len(), STANDARD_VALIDATORS.len());
        for name in STANDARD_VALIDATORS {
            assert!(registry.contains(name), "{} missing", name);
        }
        assert_eq!(
            registry.names(),
            vec!["alphanumeric", "noWhitespace", "nonEmpty", "nonNegative", "positive"]
        );
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = CustomValidatorRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup("even").is_none());

        registry.register("even", |value: &Value, path: &str| match value.as_i64() {
            Some(n) if n % 2 == 0 => Vec::new(),
            _ => vec![format!("{} must be even", path)],
        });

        let even = registry.lookup("even").unwrap();
        assert!(even(&json!(4), "count").is_empty());
        assert_eq!(even(&json!(3), "count"), vec!["count must be even"]);
    }

    #[test]
    fn test_register_replaces_existing() {
        let registry = CustomValidatorRegistry::with_defaults();
        registry.register("positive", |_: &Value, _: &str| Vec::new());
        let positive = registry.lookup("positive").unwrap();
        assert!(positive(&json!(-1), "n").is_empty());
        assert_eq!(registry.len(), STANDARD_VALIDATORS.len());
    }

    #[test]
    fn test_standard_validators() {
        assert_eq!(non_empty(&json!("  "), "name"), vec!["name must not be empty"]);
        assert!(non_empty(&json!([1]), "tags").is_empty());
        assert!(!non_empty(&json!({}), "meta").is_empty());

        assert!(alphanumeric(&json!("abc123"), "code").is_empty());
        assert_eq!(
            alphanumeric(&json!("abc-123"), "code"),
            vec!["code must contain only letters and digits"]
        );
        assert_eq!(alphanumeric(&json!(5), "code"), vec!["code must be a string"]);

        assert_eq!(
            no_whitespace(&json!("a b"), "slug"),
            vec!["slug must not contain whitespace"]
        );

        assert!(positive(&json!(0.5), "n").is_empty());
        assert_eq!(positive(&json!(0), "n"), vec!["n must be positive"]);
        assert!(non_negative(&json!(0), "n").is_empty());
        assert_eq!(non_negative(&json!(-2), "n"), vec!["n must not be negative"]);
        assert_eq!(non_negative(&json!("x"), "n"), vec!["n must be a number"]);
    }

    #[test]
    fn test_global_registry_is_shared() {
        register_global("registryTestMarker", |_: &Value, _: &str| Vec::new());
        assert!(CustomValidatorRegistry::global().contains("registryTestMarker"));
        assert!(CustomValidatorRegistry::global().contains("nonEmpty"));
    }
}
