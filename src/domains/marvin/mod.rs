//! Amazing Marvin API domain.
//!
//! Tools describe the request they need as an [`OutboundCall`]; a
//! [`RemoteApi`] implementation performs it with exactly one credential
//! header and hands back the response body.

mod client;
mod error;
mod request;

pub use client::{MarvinClient, RemoteApi};
pub use error::ApiError;
pub use request::OutboundCall;
