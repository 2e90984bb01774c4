// crates/story-spoiler-config/src/lib.rs
// ============================================================================
// Module: Story Spoiler Config Library
// Description: Suite configuration model, environment overrides, and validation.
// Purpose: Single source of truth for story-spoiler.toml semantics.
// Dependencies: story-spoiler-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `story-spoiler-config` loads the target service, credentials, client
//! timeout, audit sink, and report location for a suite run. Configuration is
//! read from TOML, overridden from the environment, and validated fail-closed.
//!
//! Security posture: config inputs are untrusted; the password is redacted
//! from `Debug` output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
