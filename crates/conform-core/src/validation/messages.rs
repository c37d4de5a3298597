//! Violation message templates shared by both validators
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::coercion::format_number;
use crate::schema::SchemaType;

/// Placeholder shown for the root path
pub const ROOT_PATH: &str = "value";

/// Render a path for display, substituting the root placeholder
pub fn display(path: &str) -> &str {
    if path.is_empty() {
        ROOT_PATH
    } else {
        path
    }
}

pub fn type_mismatch(path: &str, expected: SchemaType) -> String {
    format!("{} must be {}", display(path), expected.with_article())
}

pub fn required(path: &str) -> String {
    format!("{} is required", display(path))
}

pub fn min_length(path: &str, min: usize) -> String {
    format!("{} must be at least {} characters", display(path), min)
}

pub fn max_length(path: &str, max: usize) -> String {
    format!("{} must be no more than {} characters", display(path), max)
}

pub fn invalid_pattern(path: &str, pattern: &str) -> String {
    format!("{} has an invalid pattern '{}'", display(path), pattern)
}

pub fn pattern_mismatch(path: &str, pattern: &str) -> String {
    format!("{} must match pattern {}", display(path), pattern)
}

pub fn not_in_enum(path: &str, allowed: &[String]) -> String {
    format!("{} must be one of: {}", display(path), allowed.join(", "))
}

pub fn invalid_format(path: &str, format: &str) -> String {
    format!("{} must be a valid {}", display(path), format)
}

pub fn unknown_format(path: &str, format: &str) -> String {
    format!("{} has unknown format '{}'", display(path), format)
}

pub fn below_minimum(path: &str, minimum: f64) -> String {
    format!("{} must be at least {}", display(path), format_number(minimum))
}

pub fn above_maximum(path: &str, maximum: f64) -> String {
    format!("{} must be no more than {}", display(path), format_number(maximum))
}

pub fn unknown_validator(path: &str, name: &str) -> String {
    format!(
        "{} references unknown custom validator '{}'",
        display(path),
        name
    )
}

pub fn too_deep(path: &str, max_depth: usize) -> String {
    format!(
        "{} exceeds maximum nesting depth of {}",
        display(path),
        max_depth
    )
}
