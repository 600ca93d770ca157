use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::StoreConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl StoreConfig {
    /// Loads configuration from `path`.
    ///
    /// Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: StoreConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Like [`load_from`](Self::load_from), but a missing file yields
    /// `StoreConfig::default()`.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No store config, using defaults");
            return Ok(StoreConfig::default());
        }
        Self::load_from(path)
    }

    /// Parses and validates configuration held in memory.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: PathBuf::from("<inline>"),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The store name is not blank
    /// - The initial state is a table
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Store name must not be empty".to_string(),
            });
        }

        if !self.initial_state.is_object() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "initial_state must be a table, got '{}'",
                    self.initial_state
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_nested_initial_state() {
        let config = StoreConfig::from_toml_str(
            r#"
name = "todos"

[initial_state]
filter = "all"
items = []

[initial_state.meta]
version = 2
"#,
        )
        .unwrap();

        assert_eq!(config.name, "todos");
        assert_eq!(
            config.initial_state,
            json!({ "filter": "all", "items": [], "meta": { "version": 2 } })
        );
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let err = StoreConfig::from_toml_str("name = \"  \"").unwrap_err();
        match err {
            ConfigError::ValidationError { message } => {
                assert!(message.contains("must not be empty"));
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_initial_state_fails_validation() {
        let err = StoreConfig::from_toml_str("initial_state = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = StoreConfig::from_toml_str("name = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
