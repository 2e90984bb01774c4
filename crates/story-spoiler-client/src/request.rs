// crates/story-spoiler-client/src/request.rs
// ============================================================================
// Module: API Requests and Responses
// Description: Transport-neutral request descriptors and raw responses.
// Purpose: Let scenarios describe calls without touching reqwest directly.
// Dependencies: reqwest, serde, serde_json, story-spoiler-core
// ============================================================================

//! ## Overview
//! An [`ApiRequest`] is a method, an [`ApiPath`], and an optional JSON body
//! that is encoded once at build time. An [`ApiResponse`] is the status code
//! plus the raw body text; decoding is left to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Method;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use story_spoiler_core::ApiPath;

use crate::client::ClientError;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Description of one HTTP call against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    method: Method,
    /// Relative endpoint path.
    path: ApiPath,
    /// Encoded JSON body.
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request without a body.
    #[must_use]
    pub const fn new(method: Method, path: ApiPath) -> Self {
        Self {
            method,
            path,
            body: None,
        }
    }

    /// `GET` request.
    #[must_use]
    pub const fn get(path: ApiPath) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request.
    #[must_use]
    pub const fn post(path: ApiPath) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request.
    #[must_use]
    pub const fn put(path: ApiPath) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub const fn delete(path: ApiPath) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] when the value cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, ClientError> {
        let bytes = serde_json::to_vec(value).map_err(|err| ClientError::Encode(err.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the endpoint path.
    #[must_use]
    pub const fn path(&self) -> &ApiPath {
        &self.path
    }

    /// Returns the encoded JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Raw response returned by an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    status: StatusCode,
    /// Raw body text.
    body: String,
}

impl ApiResponse {
    /// Creates a response from a status and body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
