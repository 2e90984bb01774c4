// system-tests/src/lib.rs
// ============================================================================
// Module: Story Spoiler System Tests Library
// Description: Shared configuration for system test binaries.
// Purpose: Provide typed access to system-test environment settings.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the Story Spoiler
//! system-tests binaries in `system-tests/tests`. The stub suite runs against
//! an in-process service; the live suite targets a deployed service and is
//! gated behind the `system-tests` feature.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
