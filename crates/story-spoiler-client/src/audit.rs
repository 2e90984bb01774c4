// crates/story-spoiler-client/src/audit.rs
// ============================================================================
// Module: Suite Audit Logging
// Description: Structured audit events for authentication, HTTP, and scenarios.
// Purpose: Emit JSON-line logs without hard dependencies on a log pipeline.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are plain `Serialize` structs tagged with an `event` label and
//! a millisecond timestamp. Sinks decide where the JSON lines go. Events never
//! carry passwords or bearer tokens.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome label shared by every audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The operation completed.
    Ok,
    /// The operation failed.
    Error,
}

/// Authentication attempt event.
#[derive(Debug, Clone, Serialize)]
pub struct AuthAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Username presented to the endpoint.
    pub username: String,
    /// Attempt outcome.
    pub outcome: AuditOutcome,
    /// Normalized error kind label when the attempt failed.
    pub error_kind: Option<&'static str>,
}

/// HTTP exchange event.
#[derive(Debug, Clone, Serialize)]
pub struct HttpAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// HTTP method.
    pub method: String,
    /// Relative request path.
    pub path: String,
    /// Response status when a response arrived.
    pub status: Option<u16>,
    /// Transport outcome (HTTP error statuses still count as `ok`).
    pub outcome: AuditOutcome,
    /// Transport error message when the exchange failed.
    pub error: Option<String>,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Scenario result event.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Scenario order index.
    pub order: u32,
    /// Scenario name.
    pub scenario: String,
    /// Scenario outcome.
    pub outcome: AuditOutcome,
    /// Failure description when the scenario failed.
    pub failure: Option<String>,
    /// Scenario duration in milliseconds.
    pub duration_ms: u64,
}

/// Inputs required to construct an HTTP audit event.
pub struct HttpAuditEventParams {
    /// HTTP method.
    pub method: String,
    /// Relative request path.
    pub path: String,
    /// Response status when a response arrived.
    pub status: Option<u16>,
    /// Transport error message when the exchange failed.
    pub error: Option<String>,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Returns the current wall-clock time in milliseconds since the epoch.
#[must_use]
pub fn now_millis() -> u64 {
    clamp_millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

/// Returns the milliseconds elapsed since `started`.
#[must_use]
pub fn elapsed_millis(started: Instant) -> u64 {
    clamp_millis(started.elapsed())
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
fn clamp_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl AuthAuditEvent {
    /// Creates a new authentication event with a consistent timestamp.
    #[must_use]
    pub fn new(username: &str, error_kind: Option<&'static str>) -> Self {
        let outcome = if error_kind.is_some() { AuditOutcome::Error } else { AuditOutcome::Ok };
        Self {
            event: "authentication",
            timestamp_ms: now_millis(),
            username: username.to_string(),
            outcome,
            error_kind,
        }
    }
}

impl HttpAuditEvent {
    /// Creates a new HTTP event with a consistent timestamp.
    #[must_use]
    pub fn new(params: HttpAuditEventParams) -> Self {
        let outcome = if params.error.is_some() { AuditOutcome::Error } else { AuditOutcome::Ok };
        Self {
            event: "http_request",
            timestamp_ms: now_millis(),
            method: params.method,
            path: params.path,
            status: params.status,
            outcome,
            error: params.error,
            latency_ms: params.latency_ms,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

impl ScenarioAuditEvent {
    /// Creates a new scenario event with a consistent timestamp.
    #[must_use]
    pub fn new(order: u32, scenario: &str, failure: Option<String>, duration_ms: u64) -> Self {
        let outcome = if failure.is_some() { AuditOutcome::Error } else { AuditOutcome::Ok };
        Self {
            event: "scenario_result",
            timestamp_ms: now_millis(),
            order,
            scenario: scenario.to_string(),
            outcome,
            failure,
            duration_ms,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for suite events.
pub trait AuditSink: Send + Sync {
    /// Record an HTTP exchange.
    fn record_http(&self, event: &HttpAuditEvent);

    /// Record an authentication attempt.
    fn record_auth(&self, _event: &AuthAuditEvent) {}

    /// Record a scenario result.
    fn record_scenario(&self, _event: &ScenarioAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl StderrAuditSink {
    /// Writes one event as a JSON line to stderr.
    fn emit<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

impl AuditSink for StderrAuditSink {
    fn record_http(&self, event: &HttpAuditEvent) {
        Self::emit(event);
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        Self::emit(event);
    }

    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        Self::emit(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event as a JSON line.
    fn emit<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_http(&self, event: &HttpAuditEvent) {
        self.emit(event);
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        self.emit(event);
    }

    fn record_scenario(&self, event: &ScenarioAuditEvent) {
        self.emit(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_http(&self, _event: &HttpAuditEvent) {}
}
