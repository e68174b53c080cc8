//! Configuration for cluster view tooling
//!
//! Supports YAML configuration files with module-based organization

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Snapshot configuration
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl ViewConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to YAML file
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let yaml =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        std::fs::write(path, yaml).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: ViewConfig) {
        self.snapshot.merge(other.snapshot);
        self.log.merge(other.log);
        self.output.merge(other.output);
    }
}

/// Snapshot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot file path
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
    /// Build every index right after loading
    #[serde(default)]
    pub eager: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            eager: false,
        }
    }
}

impl SnapshotConfig {
    fn merge(&mut self, other: Self) {
        if !other.path.as_os_str().is_empty() {
            self.path = other.path;
        }
        if other.eager {
            self.eager = true;
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    fn merge(&mut self, other: Self) {
        if !other.level.is_empty() {
            self.level = other.level;
        }
    }
}

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl OutputConfig {
    fn merge(&mut self, other: Self) {
        if other.format != OutputFormat::default() {
            self.format = other.format;
        }
        if other.pretty {
            self.pretty = true;
        }
    }
}

// Default value functions

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./cluster_snapshot.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
}
