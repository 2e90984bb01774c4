// crates/story-spoiler-harness/src/catalog.rs
// ============================================================================
// Module: Scenario Catalog
// Description: The seven ordered Story Spoiler API scenarios.
// Purpose: Declare payloads, expected statuses, and messages as data.
// Dependencies: story-spoiler-client, story-spoiler-core
// ============================================================================

//! ## Overview
//! The catalog covers the story lifecycle (create, edit, list, delete) and
//! three negative paths. Scenarios 2 and 4 read the story identifier captured
//! by scenario 1; scenarios 6 and 7 use identifiers that never exist on the
//! service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use story_spoiler_client::ApiRequest;
use story_spoiler_client::StatusCode;
use story_spoiler_core::ApiPath;
use story_spoiler_core::StoryDto;
use story_spoiler_core::StoryId;

use crate::runner::SuiteContext;
use crate::scenario::BodyCheck;
use crate::scenario::Capture;
use crate::scenario::Scenario;
use crate::scenario::ScenarioFailure;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Message returned on successful creation.
pub const CREATED_MESSAGE: &str = "Successfully created!";
/// Message returned on successful edit.
pub const EDITED_MESSAGE: &str = "Successfully edited";
/// Message returned on successful deletion.
pub const DELETED_MESSAGE: &str = "Deleted successfully!";
/// Message returned when editing an unknown story.
pub const EDIT_NOT_FOUND_MESSAGE: &str = "No spoilers...";
/// Message returned when deleting an unknown story.
pub const DELETE_REJECTED_MESSAGE: &str = "Unable to delete this story spoiler!";
/// Identifier used for the edit-missing-story scenario.
pub const NONEXISTENT_EDIT_ID: &str = "1234";
/// Identifier used for the delete-missing-story scenario.
pub const NONEXISTENT_DELETE_ID: &str = "1235";

/// Story body sent by the create scenario.
#[must_use]
pub fn new_story() -> StoryDto {
    StoryDto::new("New Story Line", "Description for the Exam", "")
}

/// Story body sent by both edit scenarios.
#[must_use]
pub fn edited_story() -> StoryDto {
    StoryDto::new("Edited story line", "Edited description", "")
}

/// Story body missing the required description.
#[must_use]
pub fn incomplete_story() -> StoryDto {
    StoryDto::without_description("New Story Line", "")
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Returns the suite scenarios in execution order.
#[must_use]
pub fn story_api_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            order: 1,
            name: "create_story_returns_created",
            build_request: create_story,
            expected_status: StatusCode::CREATED,
            body_check: BodyCheck::MessageContains(CREATED_MESSAGE),
            capture: Capture::CreatedStoryId,
        },
        Scenario {
            order: 2,
            name: "edit_created_story_returns_ok",
            build_request: edit_created_story,
            expected_status: StatusCode::OK,
            body_check: BodyCheck::MessageContains(EDITED_MESSAGE),
            capture: Capture::Nothing,
        },
        Scenario {
            order: 3,
            name: "list_stories_returns_non_empty_list",
            build_request: list_stories,
            expected_status: StatusCode::OK,
            body_check: BodyCheck::NonEmptyStoryList,
            capture: Capture::Nothing,
        },
        Scenario {
            order: 4,
            name: "delete_created_story_returns_ok",
            build_request: delete_created_story,
            expected_status: StatusCode::OK,
            body_check: BodyCheck::MessageContains(DELETED_MESSAGE),
            capture: Capture::Nothing,
        },
        Scenario {
            order: 5,
            name: "create_story_without_required_fields_returns_bad_request",
            build_request: create_incomplete_story,
            expected_status: StatusCode::BAD_REQUEST,
            body_check: BodyCheck::StatusOnly,
            capture: Capture::Nothing,
        },
        Scenario {
            order: 6,
            name: "edit_missing_story_returns_not_found",
            build_request: edit_missing_story,
            expected_status: StatusCode::NOT_FOUND,
            body_check: BodyCheck::MessageContains(EDIT_NOT_FOUND_MESSAGE),
            capture: Capture::Nothing,
        },
        Scenario {
            order: 7,
            name: "delete_missing_story_returns_bad_request",
            build_request: delete_missing_story,
            expected_status: StatusCode::BAD_REQUEST,
            body_check: BodyCheck::MessageContains(DELETE_REJECTED_MESSAGE),
            capture: Capture::Nothing,
        },
    ]
}

// ============================================================================
// SECTION: Request Builders
// ============================================================================

/// Builds the create request with the full story body.
fn create_story(_context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    ApiRequest::post(ApiPath::story_create())
        .with_json(&new_story())
        .map_err(ScenarioFailure::from)
}

/// Builds the edit request for the story captured by scenario 1.
fn edit_created_story(context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    let story_id = context.state.require_last_created()?;
    ApiRequest::put(ApiPath::story_edit(story_id))
        .with_json(&edited_story())
        .map_err(ScenarioFailure::from)
}

/// Builds the list request.
fn list_stories(_context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    Ok(ApiRequest::get(ApiPath::story_all()))
}

/// Builds the delete request for the story captured by scenario 1.
fn delete_created_story(context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    let story_id = context.state.require_last_created()?;
    Ok(ApiRequest::delete(ApiPath::story_delete(story_id)))
}

/// Builds a create request without a description.
fn create_incomplete_story(_context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    ApiRequest::post(ApiPath::story_create())
        .with_json(&incomplete_story())
        .map_err(ScenarioFailure::from)
}

/// Builds an edit request for an identifier the service never issued.
fn edit_missing_story(_context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    let story_id = StoryId::from(NONEXISTENT_EDIT_ID);
    ApiRequest::put(ApiPath::story_edit(&story_id))
        .with_json(&edited_story())
        .map_err(ScenarioFailure::from)
}

/// Builds a delete request for an identifier the service never issued.
fn delete_missing_story(_context: &SuiteContext) -> Result<ApiRequest, ScenarioFailure> {
    let story_id = StoryId::from(NONEXISTENT_DELETE_ID);
    Ok(ApiRequest::delete(ApiPath::story_delete(&story_id)))
}
