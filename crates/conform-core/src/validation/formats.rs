//! Built-in string formats checked during validation
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::sync::OnceLock;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$";

/// ISO-8601 date-time; fractional seconds are optional, an offset is not
pub const DATE_TIME_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$";

pub const URI_PATTERN: &str = r"^(https?|ftp)://[^\s/$.?#].[^\s]*$";

/// A format name the validators know how to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFormat {
    Email,
    DateTime,
    Uri,
}

impl BuiltinFormat {
    /// Resolve a schema `format` keyword
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(BuiltinFormat::Email),
            "date-time" => Some(BuiltinFormat::DateTime),
            "uri" => Some(BuiltinFormat::Uri),
            _ => None,
        }
    }

    /// The keyword as written in schemas and messages
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFormat::Email => "email",
            BuiltinFormat::DateTime => "date-time",
            BuiltinFormat::Uri => "uri",
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            BuiltinFormat::Email => EMAIL_PATTERN,
            BuiltinFormat::DateTime => DATE_TIME_PATTERN,
            BuiltinFormat::Uri => URI_PATTERN,
        }
    }

    /// Compiled pattern held in a process-lifetime static
    pub fn regex(&self) -> &'static Regex {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static DATE_TIME: OnceLock<Regex> = OnceLock::new();
        static URI: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            BuiltinFormat::Email => &EMAIL,
            BuiltinFormat::DateTime => &DATE_TIME,
            BuiltinFormat::Uri => &URI,
        };
        cell.get_or_init(|| Regex::new(self.pattern()).expect("built-in format pattern compiles"))
    }
}
