//! # Runtime Configuration
//!
//! Configuration for the registry, service, and demo client.

use serde::{Deserialize, Serialize};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Registry configuration.
    pub registry: RegistryConfig,
    /// Client configuration.
    pub client: ClientConfig,
}

/// Endpoint registry limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum concurrently registered peers.
    pub capacity: usize,
}

/// Client driver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Response wait window in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig {
                capacity: relay_bus::DEFAULT_REGISTRY_CAPACITY,
            },
            client: ClientConfig {
                request_timeout_ms: 5_000,
            },
        }
    }
}

impl RelayConfig {
    /// Validate the configuration before startup.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - registry capacity is zero (nothing could ever register)
    /// - the client timeout is zero (every request would expire instantly)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.client.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Registry capacity is zero.
    ZeroCapacity,
    /// Client timeout is zero.
    ZeroTimeout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "registry capacity must be nonzero"),
            Self::ZeroTimeout => write!(f, "client request timeout must be nonzero"),
        }
    }
}

impl std::error::Error for ConfigError {}
