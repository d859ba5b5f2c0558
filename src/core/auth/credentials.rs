//! Credential pair, privilege tiers and the resolution chain.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::CredentialsConfig;

/// Inbound header carrying the api-tier token.
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Inbound header carrying the full-access token.
pub const FULL_ACCESS_TOKEN_HEADER: &str = "x-full-access-token";

/// Privilege tier a tool requires when calling the Marvin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialTier {
    /// Ordinary read/write operations.
    Api,
    /// Arbitrary document mutation and bulk destructive operations.
    FullAccess,
}

impl CredentialTier {
    /// Outbound header name the Marvin API expects for this tier.
    pub fn header_name(self) -> &'static str {
        match self {
            Self::Api => "X-API-Token",
            Self::FullAccess => "X-Full-Access-Token",
        }
    }
}

impl fmt::Display for CredentialTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api token"),
            Self::FullAccess => f.write_str("full access token"),
        }
    }
}

/// A single outbound credential header.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AuthHeader<'a> {
    pub name: &'static str,
    pub token: &'a str,
}

impl fmt::Debug for AuthHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthHeader")
            .field("name", &self.name)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Resolved credential pair, owned by exactly one connection.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_token: String,
    full_access_token: String,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, full_access_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            full_access_token: full_access_token.into(),
        }
    }

    /// Token for the given tier.
    pub fn token_for(&self, tier: CredentialTier) -> &str {
        match tier {
            CredentialTier::Api => &self.api_token,
            CredentialTier::FullAccess => &self.full_access_token,
        }
    }

    /// The one header an outbound call of this tier carries.
    pub fn header_for(&self, tier: CredentialTier) -> AuthHeader<'_> {
        AuthHeader {
            name: tier.header_name(),
            token: self.token_for(tier),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"[REDACTED]")
            .field("full_access_token", &"[REDACTED]")
            .finish()
    }
}

/// Raw credential values carried by one inbound connection.
///
/// `bearer` is the value after `Bearer ` in an `Authorization` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialSources<'a> {
    pub bearer: Option<&'a str>,
    pub api_token: Option<&'a str>,
    pub full_access_token: Option<&'a str>,
}

/// Credential resolution failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(
        "Unauthorized. Provide API tokens via environment variables (MARVIN_API_TOKEN, \
         MARVIN_FULL_ACCESS_TOKEN) or headers (\"x-api-token\", \"x-full-access-token\", \
         or \"Authorization: Bearer <token>\")."
    )]
    MissingCredentials { missing: Vec<CredentialTier> },
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the credential pair for one connection.
///
/// Api tier: bearer value, then the environment default, then the
/// `x-api-token` header. Full-access tier: environment default, then the
/// `x-full-access-token` header. Empty values count as absent.
pub fn resolve_credentials(
    sources: &CredentialSources<'_>,
    defaults: &CredentialsConfig,
) -> Result<Credentials, AuthError> {
    let api_token = present(sources.bearer)
        .or_else(|| present(defaults.api_token.as_deref()))
        .or_else(|| present(sources.api_token));

    let full_access_token = present(defaults.full_access_token.as_deref())
        .or_else(|| present(sources.full_access_token));

    match (api_token, full_access_token) {
        (Some(api), Some(full)) => Ok(Credentials::new(api, full)),
        (api, full) => {
            let mut missing = Vec::new();
            if api.is_none() {
                missing.push(CredentialTier::Api);
            }
            if full.is_none() {
                missing.push(CredentialTier::FullAccess);
            }
            Err(AuthError::MissingCredentials { missing })
        }
    }
}
