//! HTTP client for the Marvin API.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ApiError, OutboundCall};
use crate::core::auth::AuthHeader;
use crate::core::config::ApiConfig;

/// Performs outbound calls against the remote API.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Send `call` with the single credential header `auth` and return the
    /// response body. Non-JSON bodies come back as a JSON string.
    async fn send(&self, call: &OutboundCall, auth: AuthHeader<'_>) -> Result<Value, ApiError>;
}

/// reqwest-backed [`RemoteApi`].
///
/// Holds no credentials; the underlying connection pool is shared by all
/// connections.
#[derive(Debug, Clone)]
pub struct MarvinClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MarvinClient {
    /// Build a client for the configured base URL.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::invalid_url(&config.base_url, e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::invalid_url(&config.base_url, "cannot be a base URL"));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for a call: base path, then the call's segments, then its query.
    pub fn url_for(&self, call: &OutboundCall) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_url(self.base_url.as_str(), "cannot be a base URL"))?
            .pop_if_empty()
            .extend(&call.segments);
        url.set_query(call.query.as_deref());
        Ok(url)
    }
}

#[async_trait]
impl RemoteApi for MarvinClient {
    #[instrument(skip_all, fields(method = %call.method, path = %call.path()))]
    async fn send(&self, call: &OutboundCall, auth: AuthHeader<'_>) -> Result<Value, ApiError> {
        let url = self.url_for(call)?;
        debug!("Calling Marvin API with {}", auth.name);

        let mut request = self
            .http
            .request(call.method.clone(), url)
            .header(auth.name, auth.token);
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Marvin API returned {}", status);
            return Err(ApiError::Status { status, body: text });
        }

        debug!("Marvin API returned {} ({} bytes)", status, text.len());
        Ok(parse_body(text))
    }
}

/// Parse a response body, keeping non-JSON payloads (e.g. a bare `OK`) as a
/// JSON string.
fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
