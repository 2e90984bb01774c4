// crates/story-spoiler-core/src/state.rs
// ============================================================================
// Module: Suite State
// Description: State shared between ordered scenarios within one run.
// Purpose: Carry the last created story identifier explicitly.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`SuiteState`] replaces a process-wide "last created id" with an explicit
//! value owned by the runner context. Reading the identifier before a create
//! has succeeded is an error rather than an empty string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::identifiers::StoryId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite state access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// No story has been created in this run.
    #[error("no story created in this run")]
    NoCreatedStory,
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Mutable state threaded through one suite execution.
///
/// # Invariants
/// - `last_created` is only set from a successful create response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteState {
    /// Most recently created story identifier.
    last_created: Option<StoryId>,
}

impl SuiteState {
    /// Creates empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_created: None,
        }
    }

    /// Records the identifier of a newly created story.
    pub fn record_created(&mut self, id: StoryId) {
        self.last_created = Some(id);
    }

    /// Returns the last created identifier, if any.
    #[must_use]
    pub const fn last_created(&self) -> Option<&StoryId> {
        self.last_created.as_ref()
    }

    /// Returns the last created identifier or fails when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoCreatedStory`] before a create has succeeded.
    pub fn require_last_created(&self) -> Result<&StoryId, StateError> {
        self.last_created.as_ref().ok_or(StateError::NoCreatedStory)
    }
}
