//! Credential resolution for inbound connections.
//!
//! Every connection resolves its own [`Credentials`] from the sources it
//! carries, falling back to the environment defaults held in
//! [`CredentialsConfig`](crate::core::config::CredentialsConfig). Nothing is
//! cached between connections.

mod credentials;

pub use credentials::{
    API_TOKEN_HEADER, AuthError, AuthHeader, CredentialSources, CredentialTier, Credentials,
    FULL_ACCESS_TOKEN_HEADER, resolve_credentials,
};
