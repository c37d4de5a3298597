//! Construction helpers for schemas and properties
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::types::{Property, Schema, SchemaType};

impl Property {
    /// Create a property expecting the given kind
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Create a property with no kind constraint
    pub fn any() -> Self {
        Self::default()
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    /// Create an array property whose elements must match `items`
    pub fn array(items: Property) -> Self {
        Self::new(SchemaType::Array).items(items)
    }

    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    #[must_use]
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Restrict a string to the given values
    #[must_use]
    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn items(mut self, items: Property) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Declare a nested field
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Mark a field as required; repeated names are kept once
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    #[must_use]
    pub fn custom_validator(mut self, name: impl Into<String>) -> Self {
        self.custom_validator = Some(name.into());
        self
    }
}

impl Schema {
    /// Create a schema that accepts any value
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema expecting the given kind at the root
    pub fn of_type(schema_type: SchemaType) -> Self {
        Property::new(schema_type).into()
    }

    /// Create a schema for an object root
    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    /// Create a schema for an array root whose elements match `items`
    pub fn array(items: Property) -> Self {
        Property::array(items).into()
    }

    /// Declare a root field
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, property: Property) -> Self {
        self.node = self.node.property(name, property);
        self
    }

    /// Mark a root field as required
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.node = self.node.require(name);
        self
    }

    /// Replace the root node's constraint bundle
    #[must_use]
    pub fn with_node(mut self, node: Property) -> Self {
        self.node = node;
        self
    }
}
