// crates/story-spoiler-core/src/lib.rs
// ============================================================================
// Module: Story Spoiler Core Library
// Description: Shared data model for the Story Spoiler API suite.
// Purpose: Define wire DTOs, identifiers, endpoint paths, and suite state.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! `story-spoiler-core` holds the transport-independent model used by the
//! client and the scenario harness: request/response DTOs, opaque identifiers,
//! credentials, endpoint paths, and the state threaded between scenarios.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod credentials;
pub mod dto;
pub mod endpoints;
pub mod identifiers;
pub mod state;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use credentials::Credentials;
pub use credentials::SessionToken;
pub use dto::ApiResponseDto;
pub use dto::AuthenticationRequest;
pub use dto::AuthenticationResponse;
pub use dto::StoryDto;
pub use endpoints::ApiPath;
pub use identifiers::StoryId;
pub use state::StateError;
pub use state::SuiteState;
