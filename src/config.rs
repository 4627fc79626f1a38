//! Application configuration management.
//!
//! Persisted defaults for the comparison knobs (similarity threshold,
//! image extension allow-list). CLI flags always win over the file;
//! a missing or unreadable file silently falls back to defaults.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::fingerprint::builder::DEFAULT_IMAGE_EXTENSIONS;
use crate::matching::matcher::DEFAULT_SIMILARITY_THRESHOLD;

/// Persisted application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Similarity threshold for the partial-duplicate bucket.
    #[serde(default = "default_threshold")]
    pub similarity_threshold: u8,
    /// Extensions (without dot) compared by file name only.
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
}

fn default_threshold() -> u8 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_image_extensions() -> Vec<String> {
    DEFAULT_IMAGE_EXTENSIONS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            image_extensions: default_image_extensions(),
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    #[must_use]
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to the default platform-specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "twindiff", "twindiff")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.similarity_threshold, 90);
        assert_eq!(config.image_extensions, vec!["png", "ico"]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"similarity_threshold": 75}"#).unwrap();
        assert_eq!(config.similarity_threshold, 75);
        assert_eq!(config.image_extensions, vec!["png", "ico"]);
    }

    #[test]
    fn test_round_trip() {
        let config = Config {
            similarity_threshold: 80,
            image_extensions: vec!["svg".to_string()],
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.similarity_threshold, 80);
        assert_eq!(back.image_extensions, vec!["svg"]);
    }
}
