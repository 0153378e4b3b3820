//! Configuration management for geofetch
//!
//! This module provides a layered configuration system that loads
//! settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the
//! pattern `GEOFETCH__<section>__<key>`:
//!
//! - `GEOFETCH__DOWNLOAD__USER_AGENT=mirror-bot/1.0`
//! - `GEOFETCH__DOWNLOAD__MAX_DOWNLOAD_BYTES=2GB`
//! - `GEOFETCH__OUTPUT__DEST_DIR=/srv/rasters`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/geofetch.toml`.
//! This can be overridden using the `GEOFETCH_CONFIG` environment
//! variable.

mod models;
mod sources;

pub use crate::humanize::ByteSize;
pub use models::{Config, DownloadConfig, OutputConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    pub fn load() -> Result<Self, ConfigError> {
        Ok(sources::load()?)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        Ok(sources::load_from_sources(path)?)
    }
}
