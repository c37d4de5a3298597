//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments, which override the file

use crate::error::{Error, Result};
use conform_core::validation::DEFAULT_MAX_DEPTH;
use conform_core::{Engine, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation defaults
    pub validation: ValidationSettings,

    /// Output settings
    pub output: OutputSettings,

    /// Logging settings
    pub logging: LogSettings,
}

/// Validation defaults applied when flags are absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Engine used by `validate`
    pub engine: Engine,

    /// Coerce mismatched primitives before checking them
    pub coerce: bool,

    /// Maximum schema nesting depth
    pub max_depth: usize,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log level filter used when no `-v` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            coerce: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            progress: true,
        }
    }
}

impl ValidationSettings {
    /// Library configuration for these settings
    pub fn to_validation_config(&self) -> ValidationConfig {
        ValidationConfig::default()
            .with_coercion(self.coerce)
            .with_max_depth(self.max_depth)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!("Loaded configuration from {}", path.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        paths.push(PathBuf::from(".conform.yaml"));
        paths.push(PathBuf::from(".conform.json"));
        paths.push(PathBuf::from("conform.yaml"));
        paths.push(PathBuf::from("conform.json"));

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let conform_dir = config_dir.join("conform");
            paths.push(conform_dir.join("config.yaml"));
            paths.push(conform_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".conform.yaml"));
            paths.push(home_dir.join(".conform.json"));
        }

        paths
    }

    /// Serialize the configuration in the format implied by `path`
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        if is_yaml(path) {
            Ok(serde_yaml::to_string(self)?)
        } else {
            Ok(serde_json::to_string_pretty(self)?)
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Builder for creating configurations programmatically
#[allow(dead_code)]
pub struct ConfigBuilder {
    config: Config,
}

#[allow(dead_code)]
impl ConfigBuilder {
    /// Create a new config builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the default engine
    pub fn engine(mut self, engine: Engine) -> Self {
        self.config.validation.engine = engine;
        self
    }

    /// Enable or disable coercion by default
    pub fn coerce(mut self, coerce: bool) -> Self {
        self.config.validation.coerce = coerce;
        self
    }

    /// Set the default maximum depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.validation.max_depth = max_depth;
        self
    }

    /// Set the default output format
    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.config.output.format = format.into();
        self
    }

    /// Set the default log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = Some(level.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[allow(dead_code)]
impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
