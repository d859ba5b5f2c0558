//! Tools domain module.
//!
//! Every tool maps one validated argument object onto exactly one Marvin API
//! request.
//!
//! ## Architecture
//!
//! - `definitions/` - Params structs and request builders, grouped by area
//! - `catalog.rs` - The static list of tool definitions
//! - `validation.rs` - Schema and semantic argument checks
//! - `registry.rs` - Per-connection dispatch bound to resolved credentials
//! - `router.rs` - rmcp ToolRouter built from the catalog
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct (deriving `JsonSchema`) and a builder function to
//!    the matching file in `definitions/`
//! 2. Push a `ToolDefinition` for it in that file's `definitions()`
//!
//! Registry, router and both transports pick it up from the catalog.

pub mod catalog;
pub mod definitions;
mod error;
mod registry;
pub mod router;
pub mod validation;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use validation::{FieldError, ValidationError};

#[cfg(test)]
pub(crate) use registry::testing;
