//! Validation of decoded values against schemas
//!
//! Two interchangeable engines implement [`SchemaValidator`]:
//!
//! - **Reference**: plain recursive descent, allocation per node
//! - **Optimized**: pooled scratch buffers and a shared compiled-pattern cache
//!
//! Both walk the schema depth-first, report every violation with its path,
//! and agree on validity and error sets for any input.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod formats;
pub mod messages;
pub mod optimized;
pub mod pattern_cache;
pub mod pool;
pub mod reference;

// Re-export commonly used types
pub use base::{SchemaValidator, ValidationContext, ValidationResult};
pub use formats::BuiltinFormat;
pub use optimized::OptimizedValidator;
pub use pattern_cache::{PatternCache, PatternCacheStats};
pub use pool::{Scratch, ScratchGuard, ScratchPool};
pub use reference::ReferenceValidator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default bound on schema nesting walked before reporting a depth error
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Validation configuration shared by both engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Retry primitive type mismatches through the coercion library
    pub coerce: bool,
    /// Deepest nesting level that is still validated
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            coerce: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidationConfig {
    /// Create a configuration that rejects every type mismatch
    pub fn strict() -> Self {
        Self::default()
    }

    /// Create a configuration that coerces mismatched primitives before checking them
    pub fn coercing() -> Self {
        Self {
            coerce: true,
            ..Self::default()
        }
    }

    /// Enable or disable coercion mode
    pub fn with_coercion(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Selects a validator implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Reference,
    #[default]
    Optimized,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Reference => "reference",
            Engine::Optimized => "optimized",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(Engine::Reference),
            "optimized" => Ok(Engine::Optimized),
            other => Err(format!("unknown validation engine '{}'", other)),
        }
    }
}

/// Convenience function to create a validator for an engine
///
/// # Examples
///
/// ```rust
/// use conform_core::schema::{Property, Schema};
/// use conform_core::validation::{create_validator, Engine, ValidationConfig};
///
/// let schema = Schema::object()
///     .property("age", Property::integer().minimum(18.0))
///     .require("age");
///
/// let validator = create_validator(Engine::Optimized, ValidationConfig::default());
/// let result = validator.validate(&schema, r#"{"age": 16}"#).unwrap();
///
/// assert!(!result.valid);
/// assert_eq!(result.errors, vec!["age must be at least 18"]);
/// ```
pub fn create_validator(engine: Engine, config: ValidationConfig) -> Box<dyn SchemaValidator> {
    match engine {
        Engine::Reference => Box::new(ReferenceValidator::with_config(config)),
        Engine::Optimized => Box::new(OptimizedValidator::with_config(config)),
    }
}
