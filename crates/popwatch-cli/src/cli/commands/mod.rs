//! Command implementations.

pub mod check;
pub mod config;
pub mod registry;

use crate::config::Config;
use crate::output::OutputFormat;
use anyhow::Result;
use popwatch::Registry;
use std::path::PathBuf;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Registry path override from the command line
    pub registry: Option<PathBuf>,

    /// Listing path override from the command line
    pub listing: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Loaded configuration file
    pub config: Config,
}

impl Context {
    /// Resolve the canonical registry path: flag > config > default.
    pub fn registry_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.registry {
            return Ok(path.clone());
        }
        if let Some(path) = &self.config.registry {
            return Ok(path.clone());
        }
        Config::default_registry_path()
    }

    /// Resolve the listing path: flag > config > default.
    pub fn listing_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.listing {
            return Ok(path.clone());
        }
        if let Some(path) = &self.config.listing {
            return Ok(path.clone());
        }
        Config::default_listing_path()
    }

    /// Load the canonical registry, with a pointer at the fix when the
    /// file is not there yet.
    pub fn load_registry(&self) -> Result<Registry> {
        let path = self.registry_path()?;

        if !path.exists() {
            anyhow::bail!(
                "No registry at {}.\n\n\
                 Build one with:\n  \
                 popwatch registry fetch\n  \
                 popwatch registry filter\n\n\
                 then annotate codes and subnets in the listing file.",
                path.display()
            );
        }

        Ok(Registry::load(&path)?)
    }
}
