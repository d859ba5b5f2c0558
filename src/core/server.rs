//! MCP Server implementation.
//!
//! One `McpServer` serves one connection: it owns a [`ToolRegistry`] bound to
//! the credentials resolved for that connection and is dropped with it.
//!
//! The ToolRouter is built from the catalog in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "http")]
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};

use super::auth::Credentials;
use super::config::Config;
use crate::domains::marvin::RemoteApi;
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// Instructions reported to clients on initialization.
pub const INSTRUCTIONS: &str = "Tools for the Amazing Marvin task manager: create and \
    complete tasks, query today's schedule, track time, manage reminders, habits and \
    reward points. Document tools (createDoc, updateDoc, deleteDoc) write directly to \
    the database and require the full-access token.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry bound to this connection's credentials.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server for one connection.
    pub fn new(config: Arc<Config>, api: Arc<dyn RemoteApi>, credentials: Credentials) -> Self {
        let registry = Arc::new(ToolRegistry::new(api, credentials));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config,
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "annotations": t.annotations
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => JsonObject::new(),
            _ => {
                return Err(McpError::invalid_params(
                    "tool arguments must be an object",
                    None,
                ));
            }
        };

        self.registry
            .call_tool(name, arguments)
            .await
            .map_err(McpError::from)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::RecordingApi;
    use serde_json::json;

    fn server(api: Arc<RecordingApi>) -> McpServer {
        McpServer::new(
            Arc::new(Config::default()),
            api,
            Credentials::new("api-tok", "full-tok"),
        )
    }

    #[test]
    fn test_server_identity() {
        let server = server(Arc::new(RecordingApi::default()));
        assert_eq!(server.name(), "marvin-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));

        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_list_tools() {
        let tools = server(Arc::new(RecordingApi::default())).list_tools();
        assert_eq!(tools.len(), 32);
        for tool in &tools {
            assert!(tool["name"].is_string());
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_uses_bound_credentials() {
        let api = Arc::new(RecordingApi::default());
        let result = server(api.clone())
            .call_tool("deleteDoc", json!({ "itemId": "d1" }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token, "full-tok");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_rejects_non_object_arguments() {
        let api = Arc::new(RecordingApi::default());
        let err = server(api.clone())
            .call_tool("createTask", json!(["Buy milk"]))
            .await
            .unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(api.calls().is_empty());
    }
}
