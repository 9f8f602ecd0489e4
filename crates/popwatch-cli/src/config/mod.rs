//! Configuration management.

use crate::output::OutputFormat;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to the canonical registry file (pop.json).
    pub registry: Option<PathBuf>,

    /// Path to the full listing file (pop_all.json).
    pub listing: Option<PathBuf>,

    /// Recursive resolver for subnet checks.
    pub resolver: Option<SocketAddr>,

    /// Maximum in-flight probes.
    pub concurrency: Option<usize>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Exit non-zero when any PoP fails verification.
    #[serde(default)]
    pub strict: bool,
}

impl Config {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("io", "popwatch", "popwatch")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// The conventional registry location when nothing is configured.
    pub fn default_registry_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("pop.json"))
    }

    /// The conventional listing location when nothing is configured.
    pub fn default_listing_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("pop_all.json"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            registry: Some(PathBuf::from("/data/pop.json")),
            listing: None,
            resolver: Some("1.1.1.1:53".parse().unwrap()),
            concurrency: Some(16),
            output_format: Some(OutputFormat::Json),
            strict: true,
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml).unwrap();

        assert_eq!(loaded.registry, config.registry);
        assert_eq!(loaded.resolver, config.resolver);
        assert_eq!(loaded.concurrency, Some(16));
        assert!(loaded.strict);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.registry.is_none());
        assert!(config.resolver.is_none());
        assert!(!config.strict);
    }
}
