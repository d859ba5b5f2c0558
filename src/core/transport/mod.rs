//! Transport layer for the MCP server.
//!
//! This module provides two transport implementations:
//! - **HTTP**: JSON-RPC over POST, credentials per request - feature: `http`
//! - **STDIO**: one session over stdin/stdout, credentials from the
//!   environment - feature: `stdio`
//!
//! # Feature Flags
//!
//! - `http` (default): adds axum, tower-http, http, bytes
//! - `stdio`: uses rmcp's own stdio transport, no extra dependencies

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
