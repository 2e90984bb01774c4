// crates/story-spoiler-core/src/endpoints.rs
// ============================================================================
// Module: Story Spoiler Endpoints
// Description: Relative paths of the Story Spoiler REST API.
// Purpose: Build endpoint paths as segment lists so identifiers are encoded.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`ApiPath`] stores raw path segments. The client percent-encodes each
//! segment when joining it onto the base URL, so identifiers containing `/`
//! or spaces cannot escape their segment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::identifiers::StoryId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Common prefix of every endpoint.
const API_ROOT: &str = "api";
/// Controller segment for user endpoints.
const USER_CONTROLLER: &str = "User";
/// Controller segment for story endpoints.
const STORY_CONTROLLER: &str = "Story";

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Relative endpoint path made of unencoded segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    /// Raw path segments in order.
    segments: Vec<String>,
}

impl ApiPath {
    /// Builds a path from raw segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// `POST /api/User/Authentication`.
    #[must_use]
    pub fn authentication() -> Self {
        Self::from_segments([API_ROOT, USER_CONTROLLER, "Authentication"])
    }

    /// `POST /api/Story/Create`.
    #[must_use]
    pub fn story_create() -> Self {
        Self::from_segments([API_ROOT, STORY_CONTROLLER, "Create"])
    }

    /// `PUT /api/Story/Edit/{id}`.
    #[must_use]
    pub fn story_edit(id: &StoryId) -> Self {
        Self::from_segments([API_ROOT, STORY_CONTROLLER, "Edit", id.as_str()])
    }

    /// `GET /api/Story/All`.
    #[must_use]
    pub fn story_all() -> Self {
        Self::from_segments([API_ROOT, STORY_CONTROLLER, "All"])
    }

    /// `DELETE /api/Story/Delete/{id}`.
    #[must_use]
    pub fn story_delete(id: &StoryId) -> Self {
        Self::from_segments([API_ROOT, STORY_CONTROLLER, "Delete", id.as_str()])
    }

    /// Returns the raw segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
