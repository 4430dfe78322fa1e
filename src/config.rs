use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::name::validate_name;
use crate::model::record::{path_config, FileSystemRecord};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Show built-in (read-only) file systems in the tree
    #[serde(default)]
    pub show_builtins: bool,

    /// The file system mapping, in display order
    #[serde(default = "default_file_systems")]
    pub file_systems: Vec<FileSystemRecord>,
}

fn default_file_systems() -> Vec<FileSystemRecord> {
    vec![FileSystemRecord::builtin("default", path_config("/"))]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_builtins: false,
            file_systems: default_file_systems(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.file_systems.len());

        for record in &self.file_systems {
            validate_name(&record.name, seen.iter().copied())
                .map_err(|e| ConfigError::ValidationError(format!("file_systems: {e}")))?;
            seen.push(&record.name);
        }

        Ok(())
    }

    /// JSON Schema of the config file, pretty-printed
    pub fn schema_json() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
