//! HTTP transport for the Nextcloud surfaces consumed by the connector.
//!
//! Three kinds of remote surface exist: the plain Deck REST API (payload
//! returned directly), several OCS-wrapped APIs (payload nested at
//! `ocs.data`), and the WebDAV comments endpoint (XML in, raw text out).
//! The operation modules only ever see the normalized payload; every
//! surface-specific envelope is unwrapped here.
//!
//! No retries, no caching: each call is independent and at-most-once.
//! Bounding a hung call beyond the request timeout is the host's job.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{DeckConfig, HttpConfig};
use crate::error::{DeckError, Result};

/// Root of the WebDAV comments tree.
pub const WEBDAV_COMMENTS_ROOT: &str = "/remote.php/dav/comments";

/// The remote JSON surfaces, each with its own URL root and response
/// envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Deck REST API - payload returned directly
    Deck,
    /// Deck OCS API (comments) - payload at `ocs.data`
    DeckOcs,
    /// Files-sharing sharee search - OCS envelope
    Sharees,
    /// Cloud provisioning API (user listing) - OCS envelope
    CloudUsers,
}

impl Surface {
    /// URL root prefixed to every endpoint path on this surface
    pub fn root(self) -> &'static str {
        match self {
            Self::Deck => "/index.php/apps/deck/api/v1.0",
            Self::DeckOcs => "/ocs/v2.php/apps/deck/api/v1.0",
            Self::Sharees => "/ocs/v2.php/apps/files_sharing/api/v1",
            Self::CloudUsers => "/ocs/v2.php/cloud",
        }
    }

    /// Whether responses and error bodies use the OCS envelope
    fn is_ocs(self) -> bool {
        !matches!(self, Self::Deck)
    }
}

/// Raw result of a WebDAV comments call. The XML body is handed back
/// un-parsed; callers own any further interpretation.
#[derive(Debug, Clone)]
pub struct WebDavResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
}

/// Project the payload out of an OCS envelope.
///
/// A single, non-recursive projection: an already-unwrapped payload (no
/// `ocs.data` key path) is returned unchanged, so applying this twice
/// never double-unwraps.
pub fn unwrap_ocs(mut payload: Value) -> Value {
    if let Some(data) = payload
        .get_mut("ocs")
        .and_then(|ocs| ocs.get_mut("data"))
    {
        return data.take();
    }
    payload
}

/// Authenticated client for one Nextcloud instance.
///
/// Holds a single `reqwest::Client` so the connection pool is reused
/// across calls; the connector itself is stateless between calls.
#[derive(Debug, Clone)]
pub struct DeckClient {
    http: Client,
    config: DeckConfig,
}

impl DeckClient {
    /// Create a client with default HTTP tuning
    pub fn new(config: DeckConfig) -> Self {
        Self::with_http_config(config, &HttpConfig::default())
    }

    /// Create a client with custom HTTP tuning
    pub fn with_http_config(config: DeckConfig, http: &HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(http.timeout)
            .user_agent(&http.user_agent)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http: client,
            config,
        }
    }

    /// The configured login name (shown first in user pickers)
    pub fn username(&self) -> &str {
        &self.config.username
    }

    /// Base request with Basic auth and the `OCS-APIRequest` marker,
    /// which Nextcloud requires on every call
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("OCS-APIRequest", "true")
    }

    /// Issue a JSON call against one of the surfaces and return the
    /// normalized payload.
    pub async fn call(
        &self,
        method: Method,
        surface: Surface,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}{}", self.config.server_url, surface.root(), path);
        debug!(%method, %url, "issuing request");

        let mut request = self
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if surface.is_ocs() {
            request = request.header(ACCEPT, "application/json");
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let payload = Self::read_json(surface, request.send().await?).await?;
        Ok(if surface.is_ocs() {
            unwrap_ocs(payload)
        } else {
            payload
        })
    }

    /// Issue a multipart POST (attachment upload) against a surface.
    pub async fn call_multipart(
        &self,
        surface: Surface,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value> {
        let url = format!("{}{}{}", self.config.server_url, surface.root(), path);
        debug!(%url, "issuing multipart request");

        let response = self
            .request(Method::POST, &url)
            .multipart(form)
            .send()
            .await?;
        let payload = Self::read_json(surface, response).await?;
        Ok(if surface.is_ocs() {
            unwrap_ocs(payload)
        } else {
            payload
        })
    }

    /// Issue a raw call against the WebDAV comments surface.
    ///
    /// The body, when given, is sent verbatim (XML); the response body is
    /// returned un-parsed together with status and content type.
    pub async fn webdav(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        content_type: &str,
    ) -> Result<WebDavResponse> {
        let url = format!("{}{}{}", self.config.server_url, WEBDAV_COMMENTS_ROOT, path);
        debug!(%method, %url, "issuing WebDAV request");

        let mut request = self
            .request(method, &url)
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, "application/xml");
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let text = response.text().await.unwrap_or_default();

        if status.is_success() {
            return Ok(WebDavResponse {
                status: status.as_u16(),
                body: text,
                content_type: response_type,
            });
        }
        if status.as_u16() == 415 {
            return Err(DeckError::RemoteApi {
                status: 415,
                message: format!(
                    "unsupported media type; the server expects a content type other than {content_type}"
                ),
            });
        }
        Err(Self::map_status(Surface::Deck, status, &text))
    }

    /// Read a JSON success body, or map the failure to a `DeckError`.
    async fn read_json(surface: Surface, response: Response) -> Result<Value> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(DeckError::from);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "remote call failed");
        Err(Self::map_status(surface, status, &body))
    }

    /// Map a non-2xx response to an error kind: status code first, then
    /// any message embedded in the surface-specific error envelope, then
    /// the bare status.
    fn map_status(surface: Surface, status: StatusCode, body: &str) -> DeckError {
        let message = Self::extract_message(surface, body);
        match status.as_u16() {
            401 => DeckError::AuthenticationFailed {
                message: message.unwrap_or_else(|| "invalid username or password".into()),
            },
            403 => DeckError::AccessDenied {
                message: message
                    .unwrap_or_else(|| "you do not have permission for this action".into()),
            },
            404 => DeckError::not_found(
                message.unwrap_or_else(|| "check the supplied IDs".into()),
            ),
            other => DeckError::RemoteApi {
                status: other,
                message: message.unwrap_or_else(|| format!("HTTP {status}")),
            },
        }
    }

    /// Pull a human-readable message out of an error body, if any.
    /// REST surfaces put it at `message`, OCS surfaces at
    /// `ocs.meta.message`.
    fn extract_message(surface: Surface, body: &str) -> Option<String> {
        let json: Value = serde_json::from_str(body).ok()?;
        let message = if surface.is_ocs() {
            json.pointer("/ocs/meta/message").and_then(Value::as_str)
        } else {
            json.get("message").and_then(Value::as_str)
        }?;
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }
}
