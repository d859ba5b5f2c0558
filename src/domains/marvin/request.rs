//! Outbound request description.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One HTTP call against the Marvin API, minus the credential header.
///
/// Paths are kept as segments so identifiers are percent-encoded when the
/// final URL is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundCall {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl OutboundCall {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            query: None,
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one raw path segment (encoded later, never split).
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Encode `params` as the query string. Fields serialized as absent
    /// produce no pair; an empty result leaves the query unset.
    pub fn with_query<T: Serialize>(mut self, params: &T) -> Result<Self, serde_urlencoded::ser::Error> {
        let encoded = serde_urlencoded::to_string(params)?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    /// Path relative to the API base, for logging and tests.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}
