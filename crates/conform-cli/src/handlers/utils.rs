//! Shared utilities for command handlers

use crate::error::{Error, Result};
use conform_core::Schema;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Whether a path names a YAML document
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!("Read {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Load a schema document, YAML by extension and JSON otherwise
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = read_existing(path)?;

    let schema = if is_yaml(path) {
        Schema::from_yaml_str(&content)?
    } else {
        Schema::from_json_str(&content)?
    };

    Ok(schema)
}

/// Load an input document as a decoded value
pub fn load_document(path: &Path) -> Result<Value> {
    let content = read_existing(path)?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}
