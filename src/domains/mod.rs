//! Domains module containing business logic organized by bounded contexts.
//!
//! - `marvin` talks to the remote Amazing Marvin API
//! - `tools` describes, validates and dispatches the MCP tools built on it

pub mod marvin;
pub mod tools;
