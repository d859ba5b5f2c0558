//! STDIO transport implementation.
//!
//! Serves exactly one session over stdin/stdout. There are no inbound headers,
//! so the session's credentials come from the environment defaults alone.

use std::sync::Arc;

use rmcp::ServiceExt;
use tracing::{error, info};

use super::{TransportError, TransportResult};
use crate::core::auth::{CredentialSources, resolve_credentials};
use crate::core::{Config, McpServer};
use crate::domains::marvin::RemoteApi;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    pub async fn run(config: Arc<Config>, api: Arc<dyn RemoteApi>) -> TransportResult<()> {
        let credentials = resolve_credentials(&CredentialSources::default(), &config.credentials)
            .inspect_err(|e| error!("{}", e))?;

        let server = McpServer::new(config, api, credentials);
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
