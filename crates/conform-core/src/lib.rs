//! Conform Core - structural validation and coercion of JSON-like values
//!
//! This crate checks decoded JSON values against a declarative schema and
//! reports every violation with the path of the offending field.
//!
//! ## Features
//!
//! - **Schema Model**: typed, serde-loadable schema trees with per-node constraints
//! - **Two Engines**: a reference validator and a pooled, pattern-caching optimized validator
//! - **Format Checks**: `email`, `date-time` and `uri` string formats
//! - **Custom Validators**: named validation functions resolved from a registry
//! - **Coercion**: best-effort conversion to primitive and semantic types
//!
//! ## Quick Start
//!
//! ```rust
//! use conform_core::{OptimizedValidator, Property, Schema, SchemaValidator};
//!
//! let schema = Schema::object()
//!     .property(
//!         "address",
//!         Property::object()
//!             .property("street", Property::string())
//!             .property("city", Property::string())
//!             .require("city"),
//!     )
//!     .require("address");
//!
//! let validator = OptimizedValidator::new();
//! let result = validator
//!     .validate(&schema, r#"{"address": {"street": "1 Main St"}}"#)
//!     .unwrap();
//!
//! assert!(!result.valid);
//! assert_eq!(result.errors, vec!["address.city is required"]);
//! ```
//!
//! ## Error Model
//!
//! Input that cannot be parsed fails with [`Error::Parse`]. Input that parses
//! but violates the schema always yields `Ok(ValidationResult { valid: false, .. })`.
//! Invalid patterns, unknown formats and unknown custom validators are
//! reported as ordinary violations at their node.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod coercion;
pub mod error;
pub mod registry;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use coercion::{coerce, coerce_format, coerce_to_schema, Coerced, SemanticFormat};
pub use error::{Error, Result};
pub use registry::{register_global, CustomValidatorFn, CustomValidatorRegistry};
pub use schema::{Property, Schema, SchemaType};
pub use validation::{
    create_validator, Engine, OptimizedValidator, PatternCache, ReferenceValidator,
    SchemaValidator, ValidationConfig, ValidationResult,
};
