//! Configuration management for dscpull
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `DSCPULL__<section>__<key>`
//!
//! Examples:
//! - `DSCPULL__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `DSCPULL__CHECKSUM__DEFAULT=SHA-512`
//! - `DSCPULL__HANDLER__PROVIDER=integTest`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/dscpull.toml`.
//! This can be overridden using the `DSCPULL_CONFIG` environment variable.
//!
//! ```toml
//! [checksum]
//! default = "SHA-256"
//!
//! [handler]
//! provider = "ps5"
//!
//! [handler.params]
//! BootstrapPath = "/etc/dsc/bootstrap.ps1"
//! ```

mod models;
mod sources;
mod validation;

pub use models::{ChecksumSettings, Config, HandlerSettings, ServerConfig};
pub use validation::ValidationError;

use std::sync::Arc;
use thiserror::Error;

use crate::checksum::{ChecksumAlgorithm, ChecksumAlgorithmManager, ChecksumError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`DSCPULL__*`)
    /// 2. TOML file (default: `config/dscpull.toml`)
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Resolve the configured checksum algorithm
    pub fn checksum_algorithm(&self) -> Result<Arc<dyn ChecksumAlgorithm>, ChecksumError> {
        ChecksumAlgorithmManager::with_defaults().get(&self.checksum.default)
    }
}
