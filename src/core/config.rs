//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default base address of the Amazing Marvin API.
pub const DEFAULT_API_URL: &str = "https://serv.amazingmarvin.com/api";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Remote Marvin API configuration.
    pub api: ApiConfig,

    /// Default credentials used when a connection supplies none.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every tool path is appended to.
    pub base_url: String,
}

/// Environment-level default tokens.
///
/// These are only defaults: every connection resolves its own credential
/// pair, see [`crate::core::auth::resolve_credentials`].
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Default api-tier token (`MARVIN_API_TOKEN`).
    pub api_token: Option<String>,

    /// Default full-access token (`MARVIN_FULL_ACCESS_TOKEN`).
    pub full_access_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "full_access_token",
                &self.full_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "marvin-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). Remote API settings use the
    /// `MARVIN_` prefix.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MARVIN_API_URL") {
            config.api.base_url = url;
        }

        config.credentials.api_token = non_empty_var("MARVIN_API_TOKEN");
        config.credentials.full_access_token = non_empty_var("MARVIN_FULL_ACCESS_TOKEN");

        match (
            &config.credentials.api_token,
            &config.credentials.full_access_token,
        ) {
            (Some(_), Some(_)) => info!("Default Marvin tokens loaded from environment"),
            _ => warn!(
                "MARVIN_API_TOKEN / MARVIN_FULL_ACCESS_TOKEN not both set - \
                 clients must supply tokens via headers"
            ),
        }

        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
