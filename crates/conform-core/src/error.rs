//! Error types for the Conform core library
//!
//! Only failures that prevent validation from producing a result live here.
//! A value that parses but violates its schema is reported through
//! [`crate::ValidationResult`], never through [`Error`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for Conform operations
#[derive(Error, Debug)]
pub enum Error {
    /// The encoded input could not be parsed as JSON
    #[error("Failed to parse input: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// A typed value could not be encoded for validation
    #[error("Failed to encode value: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// A schema document could not be loaded
    #[error("Invalid schema: {message}")]
    Schema {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parse error from a JSON decoding failure
    pub fn parse(source: serde_json::Error) -> Self {
        Self::Parse { source }
    }

    /// Create an encode error from a JSON encoding failure
    pub fn encode(source: serde_json::Error) -> Self {
        Self::Encode { source }
    }

    /// Create a schema loading error
    pub fn schema<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Schema {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check whether this error came from malformed input text
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
