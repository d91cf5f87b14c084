//! Resource Index Configuration
//!
//! Manages the settings that shape a resource scan:
//! - file name patterns to ignore
//! - whether layouts contribute inline `@+id/` declarations
//! - the answer given to prompts when running headless
//! - default log level

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{ResError, Result};

/// Main resource index configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Glob patterns matched against file and folder names; matches are skipped
    pub ignore_patterns: Vec<String>,
    /// Record `@+id/` declarations found in layout and menu files
    pub scan_inline_ids: bool,
    /// Answer returned by non-interactive prompts, such as whether to skip an
    /// invalid resource folder and keep scanning
    pub confirm_default: bool,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ignore_patterns: vec![
                ".*".to_string(),
                "*~".to_string(),
                "Thumbs.db".to_string(),
                "CVS".to_string(),
            ],
            scan_inline_ids: true,
            confirm_default: true,
            log_level: "info".to_string(),
        }
    }
}

impl ResourceConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "rdroid", "R-Droid")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("resources.toml"))
    }

    /// Load configuration from the default location, falling back to defaults
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| ResError::Config("Cannot determine config path".into()))?;

        if config_file.exists() {
            Self::load_from(&config_file).await
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub async fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ResourceConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Reject settings a scan cannot work with
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignore_patterns {
            if pattern.is_empty() {
                return Err(ResError::Config("empty ignore pattern".into()));
            }
        }
        if self.log_level.trim().is_empty() {
            return Err(ResError::Config("log_level must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResourceConfig::default();
        assert!(config.scan_inline_ids);
        assert!(config.confirm_default);
        assert!(config.ignore_patterns.contains(&".*".to_string()));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ResourceConfig::from_toml("scan_inline_ids = false\n").unwrap();
        assert!(!config.scan_inline_ids);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_invalid_config() {
        let result = ResourceConfig::from_toml("log_level = \"\"\n");
        assert!(matches!(result, Err(ResError::Config(_))));

        let result = ResourceConfig::from_toml("scan_inline_ids = \"yes\"\n");
        assert!(matches!(result, Err(ResError::TomlParse(_))));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("resources.toml");

        let mut config = ResourceConfig::default();
        config.confirm_default = false;
        config.ignore_patterns.push("*.bak".to_string());
        config.save_to(&path).await.unwrap();

        let loaded = ResourceConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }
}
