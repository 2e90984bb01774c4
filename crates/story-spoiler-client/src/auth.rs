// crates/story-spoiler-client/src/auth.rs
// ============================================================================
// Module: Story Spoiler Authenticator
// Description: Exchanges credentials for a bearer token.
// Purpose: Fail fast when the login endpoint does not issue a usable token.
// Dependencies: reqwest, serde_json, url, story-spoiler-core
// ============================================================================

//! ## Overview
//! [`Authenticator`] performs one unauthenticated `POST` to the login endpoint
//! and extracts `accessToken` from the JSON response. A missing, null, or
//! empty token is reported as [`AuthError::MalformedResponse`]; the caller is
//! expected to abort the run rather than continue with an empty credential.
//! No retries are attempted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use reqwest::blocking::Client;
use story_spoiler_core::ApiPath;
use story_spoiler_core::AuthenticationRequest;
use story_spoiler_core::AuthenticationResponse;
use story_spoiler_core::Credentials;
use story_spoiler_core::SessionToken;
use thiserror::Error;
use url::Url;

use crate::audit::AuditSink;
use crate::audit::AuthAuditEvent;
use crate::client::ClientError;
use crate::client::ClientOptions;
use crate::client::endpoint_url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The authenticator could not be set up.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The login request failed before a response was read.
    #[error("authentication transport error: {0}")]
    Transport(String),
    /// The login endpoint answered with a non-success status.
    #[error("authentication rejected with status {status}")]
    Rejected {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },
    /// The response did not contain a usable token.
    #[error("authentication response malformed: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    /// Returns a stable label for audit logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Client(_) => "client",
            Self::Transport(_) => "transport",
            Self::Rejected {
                ..
            } => "rejected",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

// ============================================================================
// SECTION: Authenticator
// ============================================================================

/// Obtains session tokens from the authentication endpoint.
pub struct Authenticator {
    /// Service base URL.
    base_url: Url,
    /// Unauthenticated HTTP client.
    client: Client,
    /// Audit sink for authentication attempts.
    audit: Arc<dyn AuditSink>,
}

impl Authenticator {
    /// Builds an authenticator with a fresh HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Client`] when the transport cannot be constructed.
    pub fn new(
        base_url: Url,
        options: &ClientOptions,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, AuthError> {
        let client = options.build_http_client()?;
        Ok(Self::with_client(base_url, client, audit))
    }

    /// Builds an authenticator around a preconfigured HTTP transport.
    #[must_use]
    pub fn with_client(base_url: Url, client: Client, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            base_url,
            client,
            audit,
        }
    }

    /// Exchanges credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the request fails, is rejected, or the
    /// response carries no usable `accessToken`.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<SessionToken, AuthError> {
        let result = self.request_token(credentials);
        let error_kind = result.as_ref().err().map(AuthError::kind);
        self.audit.record_auth(&AuthAuditEvent::new(credentials.username(), error_kind));
        result
    }

    /// Performs the login call and extracts the token.
    fn request_token(&self, credentials: &Credentials) -> Result<SessionToken, AuthError> {
        let url = endpoint_url(&self.base_url, &ApiPath::authentication())?;
        let body = AuthenticationRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }
        let text = response.text().map_err(|err| AuthError::Transport(err.to_string()))?;
        parse_token(&text)
    }
}

/// Extracts a non-empty `accessToken` from a login response body.
fn parse_token(body: &str) -> Result<SessionToken, AuthError> {
    let parsed: AuthenticationResponse = serde_json::from_str(body)
        .map_err(|err| AuthError::MalformedResponse(format!("invalid json: {err}")))?;
    let token = parsed
        .access_token
        .map(SessionToken::new)
        .ok_or_else(|| AuthError::MalformedResponse("missing accessToken".to_string()))?;
    if token.is_blank() {
        return Err(AuthError::MalformedResponse("empty accessToken".to_string()));
    }
    Ok(token)
}
