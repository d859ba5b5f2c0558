//! HTTP transport implementation.
//!
//! JSON-RPC over POST. Every POST resolves its own credentials from its
//! headers (falling back to the environment defaults) and is served by a
//! fresh [`McpServer`]; nothing is shared between requests except the HTTP
//! client's connection pool.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, Method, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::auth::{
    API_TOKEN_HEADER, CredentialSources, FULL_ACCESS_TOKEN_HEADER, resolve_credentials,
};
use crate::core::server::INSTRUCTIONS;
use crate::core::{Config, McpServer};
use crate::domains::marvin::RemoteApi;

/// Protocol versions this endpoint answers `initialize` with, newest first.
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self::error_with_data(id, code, message, None)
    }

    fn error_with_data(
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    /// Body that could not be parsed as JSON.
    pub fn parse_error() -> Self {
        Self::error(Some(Value::Null), -32700, "Parse error")
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }

    /// Carry an rmcp protocol error over unchanged, data included.
    pub fn from_mcp_error(id: Option<Value>, e: rmcp::ErrorData) -> Self {
        Self::error_with_data(id, e.code.0, e.message, e.data)
    }
}

/// State shared by the HTTP handlers. Holds no credentials.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    api: Arc<dyn RemoteApi>,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, config: Arc<Config>, api: Arc<dyn RemoteApi>) -> TransportResult<()> {
        let addr = self.address();
        let app = router(config, api, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", rpc_path(&self.config));
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        info!("HTTP transport stopped");
        Ok(())
    }
}

/// Build the HTTP application.
pub fn router(config: Arc<Config>, api: Arc<dyn RemoteApi>, http: &HttpConfig) -> Router {
    let path = rpc_path(http);
    let state = AppState {
        config,
        api,
        rpc_path: path.clone(),
    };

    let mut app = Router::new()
        .route(
            &path,
            post(handle_rpc).options(preflight).get(info_page),
        )
        .route("/health", get(health_check))
        .fallback(fallback)
        .with_state(state);

    if http.enable_cors {
        app = app
            .layer(cors_layer())
            .layer(middleware::from_fn(preflight_no_content));
    }

    app.layer(TraceLayer::new_for_http())
}

fn rpc_path(http: &HttpConfig) -> String {
    if http.rpc_path.starts_with('/') {
        http.rpc_path.clone()
    } else {
        format!("/{}", http.rpc_path)
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(API_TOKEN_HEADER),
            HeaderName::from_static(FULL_ACCESS_TOKEN_HEADER),
        ])
}

/// The CORS layer answers preflights itself with 200; report 204 instead.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn info_html(rpc_path: &str) -> Html<String> {
    Html(format!(
        "<h1>MCP Server is running</h1>\n\
         <p>This server provides an interface to the Amazing Marvin API via the Model Context Protocol.</p>\n\
         <h2>Available Endpoints:</h2>\n\
         <ul>\n  \
           <li><strong>POST {rpc_path}</strong>: The main endpoint for MCP requests.</li>\n  \
           <li><strong>GET /health</strong>: Health check.</li>\n\
         </ul>\n"
    ))
}

/// Informational page for browsers.
async fn info_page(State(state): State<AppState>) -> Html<String> {
    info_html(&state.rpc_path)
}

async fn fallback(State(state): State<AppState>, method: Method) -> Response {
    if method == Method::GET {
        info_html(&state.rpc_path).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn credential_sources(headers: &HeaderMap) -> CredentialSources<'_> {
    CredentialSources {
        bearer: header_value(headers, header::AUTHORIZATION.as_str())
            .and_then(|v| v.strip_prefix("Bearer ")),
        api_token: header_value(headers, API_TOKEN_HEADER),
        full_access_token: header_value(headers, FULL_ACCESS_TOKEN_HEADER),
    }
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let credentials =
        match resolve_credentials(&credential_sources(&headers), &state.config.credentials) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!("Authorization failed: {:?}", e);
                return (StatusCode::UNAUTHORIZED, e.to_string()).into_response();
            }
        };

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Malformed JSON-RPC body: {}", e);
            return (StatusCode::BAD_REQUEST, Json(JsonRpcResponse::parse_error())).into_response();
        }
    };

    // Only a missing id marks a notification; `"id": null` still gets a reply.
    let is_notification = value.get("id").is_none();
    let id = value.get("id").cloned();
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(_) => return Json(JsonRpcResponse::invalid_request(id)).into_response(),
    };

    tracing::Span::current().record("method", request.method.as_str());

    if is_notification {
        info!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    info!("Received JSON-RPC request: {}", request.method);
    let server = McpServer::new(state.config.clone(), state.api.clone(), credentials);
    let response = process_request(&server, request).await;

    (StatusCode::OK, Json(response)).into_response()
}

/// Process a JSON-RPC request and return the response.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request).await,
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let requested = request
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str);
    let protocol_version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

    let result = serde_json::json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let result = serde_json::json!({
        "tools": server.list_tools()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(Value::as_str) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    match server.call_tool(&name, arguments).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
        },
        Err(e) => JsonRpcResponse::from_mcp_error(request.id, e),
    }
}
