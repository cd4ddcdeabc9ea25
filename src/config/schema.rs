//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

/// Root configuration for the OCS service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OcsServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// OCS endpoint settings.
    pub ocs: OcsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// OCS endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OcsConfig {
    /// Path prefix all OCS routes are mounted under.
    pub prefix: String,

    /// API version reported by the config endpoint.
    pub version: String,

    /// Server name reported by the config endpoint.
    pub website: String,

    /// Public host name of the service.
    pub host: String,

    /// Administrative contact.
    pub contact: String,

    /// Whether the service is reached over TLS.
    pub ssl: bool,
}

impl Default for OcsConfig {
    fn default() -> Self {
        Self {
            prefix: "/ocs/v1.php".to_string(),
            version: "1.7".to_string(),
            website: "ocs-response".to_string(),
            host: "localhost".to_string(),
            contact: String::new(),
            ssl: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
