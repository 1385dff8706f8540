//! HTTP transport for Redfish service endpoints
//!
//! The model layer only needs one verb: `get(uri) -> Response`. Everything
//! else (auth headers, TLS, base-URL joining) lives behind the [`Connector`]
//! trait so resources can be exercised against canned payloads in tests.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &[u8]) -> String {
    let printable: String = String::from_utf8_lossy(body)
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(MAX_LOG_BODY_LENGTH)
        .collect();

    if body.len() > MAX_LOG_BODY_LENGTH {
        format!("{}... [truncated, {} bytes total]", printable, body.len())
    } else {
        printable
    }
}

/// Body of a completed GET, owned as raw bytes.
///
/// Registry archives are binary, so the body is only decoded as JSON when
/// the caller asks for it.
#[derive(Debug, Clone)]
pub struct Response {
    body: Vec<u8>,
}

impl Response {
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }

    /// Raw body bytes (archive payloads, diagnostics).
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body as a JSON document.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).context("Failed to parse response JSON")
    }

    /// Decode the body into a caller-supplied type.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).context("Failed to parse response JSON")
    }
}

/// Transport collaborator used by every [`Resource`](crate::Resource).
///
/// Errors are opaque to the model layer; they propagate to the caller
/// unmodified. Implementations must not retry.
pub trait Connector: Send + Sync {
    fn get(&self, uri: &str) -> Result<Response>;
}

/// Blocking HTTP connector for a Redfish service.
///
/// Relative resource paths (`/redfish/v1/...`) are joined onto the service
/// base URL; absolute URIs pass through unchanged, which lets the same type
/// serve as the out-of-band connector for public registry files.
#[derive(Clone)]
pub struct HttpConnector {
    client: Client,
    base: Url,
    bearer_token: Option<String>,
}

impl HttpConnector {
    /// Create a connector rooted at the service base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid base URL: {base_url}"))?;
        let client = Client::builder()
            .user_agent(concat!("redfish-model/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base,
            bearer_token: None,
        })
    }

    /// Attach a bearer token sent with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Join a resource path onto the base URL; absolute URIs pass through.
    fn resolve(&self, uri: &str) -> Result<Url> {
        match Url::parse(uri) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base
                .join(uri)
                .with_context(|| format!("Invalid resource path: {uri}")),
            Err(e) => Err(e).with_context(|| format!("Invalid resource URI: {uri}")),
        }
    }
}

impl Connector for HttpConnector {
    fn get(&self, uri: &str) -> Result<Response> {
        let url = self.resolve(uri)?;
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().context("Failed to send request")?;
        let status = response.status();
        let body = response
            .bytes()
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        Ok(Response::new(body.to_vec()))
    }
}
