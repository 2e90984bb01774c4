// crates/story-spoiler-core/src/dto.rs
// ============================================================================
// Module: Story Spoiler DTOs
// Description: JSON payload shapes for the Story Spoiler REST API.
// Purpose: Provide serde models for requests and response envelopes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Wire payloads use lower camel case field names. Unknown response fields are
//! ignored so list responses that carry server-side metadata still decode.
//! Story text fields accept `null` as well as a missing key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::identifiers::StoryId;

// ============================================================================
// SECTION: Authentication
// ============================================================================

/// Body of `POST /api/User/Authentication`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuthenticationRequest<'a> {
    /// Account username.
    pub username: &'a str,
    /// Account password.
    pub password: &'a str,
}

/// Response of the authentication endpoint.
///
/// `accessToken` is optional here so a missing field can be reported as a
/// malformed response instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    /// Bearer token when issued.
    #[serde(default)]
    pub access_token: Option<String>,
}

// ============================================================================
// SECTION: Stories
// ============================================================================

/// Story payload used by create/edit requests and list responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDto {
    /// Story title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Story description; omitted from the wire when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional related URL (empty string when unused).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Decodes a string field, mapping `null` to the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl StoryDto {
    /// Builds a story with every field populated.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            url: url.into(),
        }
    }

    /// Builds a story without a description.
    #[must_use]
    pub fn without_description(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: url.into(),
        }
    }
}

/// Envelope returned by the mutating story endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseDto {
    /// Human-readable outcome message.
    pub msg: String,
    /// Identifier of the created story (create endpoint only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<StoryId>,
}
