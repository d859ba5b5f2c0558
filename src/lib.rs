//! Amazing Marvin MCP Server Library
//!
//! This crate exposes the Amazing Marvin task-management API as Model Context
//! Protocol (MCP) tools. Each tool call is validated and turned into exactly
//! one request against the Marvin API.
//!
//! # Architecture
//!
//! - **core**: configuration, credential resolution, error handling, the MCP
//!   server handler and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **marvin**: HTTP client for the remote API
//!   - **tools**: the tool catalog, argument validation and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use marvin_mcp_server::core::{Config, TransportService};
//! use marvin_mcp_server::domains::marvin::MarvinClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::from_env());
//!     let api = Arc::new(MarvinClient::new(&config.api)?);
//!     TransportService::new(config, api).run().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
