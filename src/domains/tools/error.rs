//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use super::validation::ValidationError;

/// Errors that can occur during tool operations.
///
/// Remote API failures are not here: they become an error tool result, not
/// a protocol error.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error(transparent)]
    InvalidArguments(#[from] ValidationError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(format!("failed to encode request body: {}", e))
    }
}

impl From<serde_urlencoded::ser::Error> for ToolError {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        Self::internal(format!("failed to encode query string: {}", e))
    }
}

impl From<ToolError> for McpError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::NotFound(_) => McpError::invalid_params("tool not found", None),
            ToolError::InvalidArguments(v) => {
                let message = v.to_string();
                let data = serde_json::json!({ "fields": v.fields });
                McpError::invalid_params(message, Some(data))
            }
            ToolError::Internal(msg) => McpError::internal_error(msg, None),
        }
    }
}
