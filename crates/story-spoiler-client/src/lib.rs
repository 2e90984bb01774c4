// crates/story-spoiler-client/src/lib.rs
// ============================================================================
// Module: Story Spoiler Client Library
// Description: Authenticated HTTP access to the Story Spoiler REST API.
// Purpose: Obtain a bearer token once and execute requests with it attached.
// Dependencies: story-spoiler-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The client crate has two entry points. [`Authenticator`] exchanges
//! credentials for a [`story_spoiler_core::SessionToken`]; [`StoryClient`]
//! holds that token for the lifetime of a run and attaches it to every request.
//! Each exchange is reported to an [`AuditSink`] as a JSON-line event.
//!
//! Non-success HTTP statuses are returned to callers as ordinary responses;
//! only transport problems are errors at this layer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod client;
pub mod request;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditOutcome;
pub use audit::AuditSink;
pub use audit::AuthAuditEvent;
pub use audit::FileAuditSink;
pub use audit::HttpAuditEvent;
pub use audit::HttpAuditEventParams;
pub use audit::NoopAuditSink;
pub use audit::ScenarioAuditEvent;
pub use audit::StderrAuditSink;
pub use audit::elapsed_millis;
pub use audit::now_millis;
pub use auth::AuthError;
pub use auth::Authenticator;
pub use client::ClientError;
pub use client::ClientOptions;
pub use client::RequestExecutor;
pub use client::StoryClient;
pub use client::endpoint_url;
pub use request::ApiRequest;
pub use request::ApiResponse;
pub use reqwest::Method;
pub use reqwest::StatusCode;
