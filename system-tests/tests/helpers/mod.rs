// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Story Spoiler system-tests.
// Purpose: Provide the stub service, artifact reporting, and timeouts.
// Dependencies: system-tests, serde_jcs, tiny_http
// ============================================================================

//! ## Overview
//! Each test owns an artifact directory and, when it needs a service, its own
//! stub instance on an ephemeral port.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]
#![allow(
    clippy::missing_docs_in_private_items,
    clippy::panic,
    reason = "Helpers fail tests loudly on broken environment configuration."
)]

pub mod story_stub;
