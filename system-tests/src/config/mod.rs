// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Process-level settings for Story Spoiler system tests.
// Purpose: Expose the artifact root and timeout floor to test helpers.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Settings that belong to the test process rather than to the suite under
//! test. Suite settings live in `story-spoiler-config`.

mod env;


pub use env::SystemTestConfig;
pub use env::SystemTestEnvError;
pub use env::SystemTestVar;
