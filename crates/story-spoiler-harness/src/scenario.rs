// crates/story-spoiler-harness/src/scenario.rs
// ============================================================================
// Module: Scenario Descriptors
// Description: Data-driven description of one ordered API check.
// Purpose: Evaluate a response against an expected status and body check.
// Dependencies: story-spoiler-client, story-spoiler-core, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Scenario`] is a row in the suite table: order index, name, a request
//! builder reading the [`SuiteContext`], the expected status, a [`BodyCheck`],
//! and a [`Capture`] that may write to suite state. Evaluation checks the
//! status first, then the body, then performs the capture.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use story_spoiler_client::ApiRequest;
use story_spoiler_client::ApiResponse;
use story_spoiler_client::ClientError;
use story_spoiler_client::StatusCode;
use story_spoiler_core::ApiResponseDto;
use story_spoiler_core::StateError;
use story_spoiler_core::StoryDto;
use thiserror::Error;

use crate::runner::SuiteContext;

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Reason a scenario did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ScenarioFailure {
    /// The request could not be built.
    #[error("request could not be built: {0}")]
    Request(String),
    /// No response was received.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The status code differed from the expectation.
    #[error("expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
    },
    /// The body did not decode into the expected DTO.
    #[error("response body did not decode: {0}")]
    Decode(String),
    /// The `msg` field did not contain the expected text.
    #[error("expected msg containing '{expected}', got '{actual}'")]
    MessageMismatch {
        /// Expected substring.
        expected: String,
        /// Actual message.
        actual: String,
    },
    /// The story list was empty.
    #[error("expected a non-empty story list")]
    EmptyList,
    /// The create response carried no story identifier.
    #[error("create response carried no storyId")]
    MissingStoryId,
    /// A dependent scenario ran without a created story.
    #[error("no story created in this run")]
    NoCreatedStory,
}

impl ScenarioFailure {
    /// Returns a stable label for the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Request(_) => "request",
            Self::Transport(_) => "transport",
            Self::StatusMismatch {
                ..
            } => "status_mismatch",
            Self::Decode(_) => "decode",
            Self::MessageMismatch {
                ..
            } => "message_mismatch",
            Self::EmptyList => "empty_list",
            Self::MissingStoryId => "missing_story_id",
            Self::NoCreatedStory => "no_created_story",
        }
    }
}

impl From<StateError> for ScenarioFailure {
    fn from(err: StateError) -> Self {
        match err {
            StateError::NoCreatedStory => Self::NoCreatedStory,
        }
    }
}

impl From<ClientError> for ScenarioFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(message) => Self::Transport(message),
            other => Self::Request(other.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Builds a scenario request from the current context.
pub type RequestBuilder = fn(&SuiteContext) -> Result<ApiRequest, ScenarioFailure>;

/// Assertion applied to the response body after the status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCheck {
    /// Only the status code is asserted.
    StatusOnly,
    /// Body decodes as an API envelope whose `msg` contains the text.
    MessageContains(&'static str),
    /// Body decodes as a non-empty list of stories.
    NonEmptyStoryList,
}

/// State written after a scenario's checks pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Nothing is written.
    Nothing,
    /// The envelope `storyId` becomes the last created story.
    CreatedStoryId,
}

/// One ordered API check.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Execution order index (ascending).
    pub order: u32,
    /// Stable scenario name.
    pub name: &'static str,
    /// Request builder.
    pub build_request: RequestBuilder,
    /// Expected response status.
    pub expected_status: StatusCode,
    /// Body assertion.
    pub body_check: BodyCheck,
    /// State capture on success.
    pub capture: Capture,
}

impl Scenario {
    /// Checks a response and applies the capture to the context.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScenarioFailure`] encountered.
    pub fn evaluate(
        &self,
        response: &ApiResponse,
        context: &mut SuiteContext,
    ) -> Result<(), ScenarioFailure> {
        if response.status() != self.expected_status {
            return Err(ScenarioFailure::StatusMismatch {
                expected: self.expected_status.as_u16(),
                actual: response.status().as_u16(),
            });
        }

        match self.body_check {
            BodyCheck::StatusOnly => {}
            BodyCheck::MessageContains(expected) => {
                let envelope = decode_envelope(response)?;
                if !envelope.msg.contains(expected) {
                    return Err(ScenarioFailure::MessageMismatch {
                        expected: expected.to_string(),
                        actual: envelope.msg,
                    });
                }
            }
            BodyCheck::NonEmptyStoryList => {
                let stories: Vec<StoryDto> = response
                    .decode()
                    .map_err(|err| ScenarioFailure::Decode(err.to_string()))?;
                if stories.is_empty() {
                    return Err(ScenarioFailure::EmptyList);
                }
            }
        }

        match self.capture {
            Capture::Nothing => {}
            Capture::CreatedStoryId => {
                let story_id = decode_envelope(response)?
                    .story_id
                    .filter(|id| !id.is_blank())
                    .ok_or(ScenarioFailure::MissingStoryId)?;
                context.state.record_created(story_id);
            }
        }
        Ok(())
    }
}

/// Decodes the standard `{msg, storyId}` envelope.
fn decode_envelope(response: &ApiResponse) -> Result<ApiResponseDto, ScenarioFailure> {
    response.decode().map_err(|err| ScenarioFailure::Decode(err.to_string()))
}
