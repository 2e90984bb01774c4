// crates/story-spoiler-client/src/client.rs
// ============================================================================
// Module: Story Spoiler HTTP Client
// Description: Bearer-authenticated client for the Story Spoiler API.
// Purpose: Execute API requests with the session token attached.
// Dependencies: reqwest, rustls, url, story-spoiler-core
// ============================================================================

//! ## Overview
//! [`StoryClient`] is built once per run from a base URL and a session token.
//! Every request carries `Authorization: Bearer <token>`. The client performs
//! blocking calls on the current thread; without a configured timeout the
//! transport default applies. Dropping the client releases its connections.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use story_spoiler_core::ApiPath;
use story_spoiler_core::SessionToken;
use thiserror::Error;
use url::Url;

use crate::audit::AuditSink;
use crate::audit::elapsed_millis;
use crate::audit::HttpAuditEvent;
use crate::audit::HttpAuditEventParams;
use crate::request::ApiRequest;
use crate::request::ApiResponse;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client construction and transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The base URL cannot be extended with endpoint segments.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The underlying HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Build(String),
    /// The request failed before a complete response was read.
    #[error("http transport error: {0}")]
    Transport(String),
    /// A request body could not be encoded.
    #[error("request encoding failed: {0}")]
    Encode(String),
}

// ============================================================================
// SECTION: Options
// ============================================================================

/// HTTP client construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientOptions {
    /// Overall request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    /// Builds a blocking HTTP client honoring these options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the client cannot be constructed.
    pub fn build_http_client(&self) -> Result<Client, ClientError> {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| ClientError::Build(err.to_string()))
    }
}

// ============================================================================
// SECTION: Executor Trait
// ============================================================================

/// Executes API requests and returns raw responses.
pub trait RequestExecutor {
    /// Executes one request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when no response could be obtained.
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError>;
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Authenticated Story Spoiler client.
pub struct StoryClient {
    /// Service base URL.
    base_url: Url,
    /// Blocking HTTP client.
    client: Client,
    /// Bearer token attached to every request.
    token: SessionToken,
    /// Audit sink for HTTP exchanges.
    audit: Arc<dyn AuditSink>,
}

impl StoryClient {
    /// Builds a client with a fresh HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the transport cannot be constructed.
    pub fn new(
        base_url: Url,
        token: SessionToken,
        options: &ClientOptions,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, ClientError> {
        let client = options.build_http_client()?;
        Ok(Self::with_client(base_url, token, client, audit))
    }

    /// Builds a client around a preconfigured HTTP transport.
    #[must_use]
    pub fn with_client(
        base_url: Url,
        token: SessionToken,
        client: Client,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            base_url,
            client,
            token,
            audit,
        }
    }

    /// Executes a request with the bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the endpoint URL cannot be
    /// built and [`ClientError::Transport`] when no response could be read.
    pub fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = endpoint_url(&self.base_url, request.path())?;
        let mut http_request =
            self.client.request(request.method().clone(), url).bearer_auth(self.token.expose());
        if let Some(body) = request.body() {
            http_request = http_request.header(CONTENT_TYPE, "application/json").body(body.to_vec());
        }

        let started = Instant::now();
        let result = http_request.send().and_then(|response| {
            let status = response.status();
            response.text().map(|body| (status, body))
        });
        let latency_ms = elapsed_millis(started);

        let request_bytes = request.body().map_or(0, <[u8]>::len);
        match result {
            Ok((status, body)) => {
                self.audit.record_http(&HttpAuditEvent::new(HttpAuditEventParams {
                    method: request.method().to_string(),
                    path: request.path().to_string(),
                    status: Some(status.as_u16()),
                    error: None,
                    latency_ms,
                    request_bytes,
                    response_bytes: body.len(),
                }));
                Ok(ApiResponse::new(status, body))
            }
            Err(err) => {
                let message = err.to_string();
                self.audit.record_http(&HttpAuditEvent::new(HttpAuditEventParams {
                    method: request.method().to_string(),
                    path: request.path().to_string(),
                    status: err.status().map(|status| status.as_u16()),
                    error: Some(message.clone()),
                    latency_ms,
                    request_bytes,
                    response_bytes: 0,
                }));
                Err(ClientError::Transport(message))
            }
        }
    }
}

impl RequestExecutor for StoryClient {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        Self::execute(self, request)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Joins endpoint segments onto the base URL, percent-encoding each segment.
///
/// Any query or fragment on the base URL is dropped.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] when the base URL cannot carry a path.
pub fn endpoint_url(base: &Url, path: &ApiPath) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(format!("base url cannot carry a path: {base}")))?;
        segments.pop_if_empty();
        segments.extend(path.segments());
    }
    Ok(url)
}
