use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::checksum::DEFAULT_ALGORITHM;
use crate::providers::ParameterValueMap;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub checksum: ChecksumSettings,
    #[serde(default)]
    pub handler: HandlerSettings,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Checksum algorithm selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChecksumSettings {
    /// Algorithm name, e.g. `SHA-256`
    #[serde(default = "default_algorithm")]
    pub default: String,
}

impl Default for ChecksumSettings {
    fn default() -> Self {
        Self {
            default: default_algorithm(),
        }
    }
}

fn default_algorithm() -> String {
    DEFAULT_ALGORITHM.to_string()
}

/// Handler provider selection and its parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerSettings {
    /// Provider name (e.g. `ps5`, `integTest`)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Parameters bound onto the handler before `init`
    #[serde(default)]
    pub params: ParameterValueMap,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            params: ParameterValueMap::new(),
        }
    }
}

fn default_provider() -> String {
    "ps5".to_string()
}
