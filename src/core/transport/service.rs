//! Transport service - starts the configured transport.

use std::sync::Arc;

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::Config;
use crate::domains::marvin::RemoteApi;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
///
/// Servers are created by the transport, one per connection, so the service
/// only holds what they are built from.
pub struct TransportService {
    config: Arc<Config>,
    api: Arc<dyn RemoteApi>,
}

impl TransportService {
    /// Create a new transport service.
    pub fn new(config: Arc<Config>, api: Arc<dyn RemoteApi>) -> Self {
        Self { config, api }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config.transport
    }

    /// Log information about the configured transport.
    pub fn log_info(&self) {
        info!("Starting transport: {}", self.config().description());
    }

    /// Run the configured transport until it shuts down.
    pub async fn run(self) -> TransportResult<()> {
        self.log_info();

        match self.config.transport.clone() {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(self.config, self.api).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(self.config, self.api).await,
        }
    }
}
