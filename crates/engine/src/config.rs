use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detect::RuleCatalog;
use crate::error::EngineError;

/// Engine configuration.
///
/// Priority: environment variables > config file > defaults. The environment
/// always wins for the rule-catalog path so deployments can retarget a
/// running image without editing files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path to a TOML rule catalog; empty means the built-in catalog.
    pub rules_path: String,
}

impl EngineConfig {
    /// Load configuration from file or environment variables.
    pub fn load() -> Result<Self, EngineError> {
        let config_path =
            std::env::var("ENGINE_CONFIG_FILE").unwrap_or_else(|_| "engine.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        if let Ok(path) = std::env::var("ENGINE_RULES_FILE") {
            config.rules_path = path;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| EngineError::ConfigFormat {
            path: path.to_string(),
            source,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.rules_path.is_empty() && !Path::new(&self.rules_path).exists() {
            return Err(format!("rule catalog not found at: {}", self.rules_path));
        }
        Ok(())
    }

    /// Build the rule catalog this configuration selects.
    pub fn catalog(&self) -> Result<RuleCatalog, EngineError> {
        if self.rules_path.is_empty() {
            Ok(RuleCatalog::healthcare_default())
        } else {
            RuleCatalog::from_file(&self.rules_path)
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules_path: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selects_built_in_catalog() {
        let config = EngineConfig::default();
        assert!(config.rules_path.is_empty());
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 12);
    }

    #[test]
    fn validate_rejects_missing_catalog_file() {
        let config = EngineConfig {
            rules_path: "/nonexistent/rules.toml".to_string(),
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("rule catalog"));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn config_parses_from_toml() {
        let config: EngineConfig = toml::from_str(r#"rules_path = "rules/healthcare.toml""#).unwrap();
        assert_eq!(config.rules_path, "rules/healthcare.toml");
    }

    #[test]
    fn unknown_path_catalog_build_fails() {
        let config = EngineConfig {
            rules_path: "/nonexistent/rules.toml".to_string(),
        };
        assert!(matches!(
            config.catalog().unwrap_err(),
            EngineError::CatalogIo { .. }
        ));
    }
}
