//! Server configuration from the environment
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5001` |
//! | `MODEL_DIR` | `.` |

use forecast_facade::ArtifactConfig;
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("Invalid HOST:PORT configuration '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
}

/// Runtime settings for the HTTP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts: ArtifactConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifacts: ArtifactConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `MODEL_DIR` from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(dir) = lookup("MODEL_DIR") {
            config.artifacts = ArtifactConfig::in_dir(dir);
        }

        Ok(config)
    }

    /// Resolve the bind address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.host, self.port);
        let invalid = |reason: String| ConfigError::InvalidAddress {
            address: address.clone(),
            reason,
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no address resolved".to_string()))
    }
}
