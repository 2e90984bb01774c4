// crates/story-spoiler-harness/src/suite.rs
// ============================================================================
// Module: Suite Entry Point
// Description: Config-driven authentication, client setup, and suite run.
// Purpose: Execute the scenario catalog end to end from a SuiteConfig.
// Dependencies: story-spoiler-client, story-spoiler-config, thiserror
// ============================================================================

//! ## Overview
//! [`run_suite`] validates the configuration, authenticates once, and runs the
//! catalog against a [`StoryClient`] carrying the session token. The client
//! lives only for the duration of the run and is dropped before report
//! artifacts are written. Authentication failures abort the run; scenario
//! failures never do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::sync::Arc;

use story_spoiler_client::AuditSink;
use story_spoiler_client::AuthError;
use story_spoiler_client::Authenticator;
use story_spoiler_client::ClientError;
use story_spoiler_client::ClientOptions;
use story_spoiler_client::FileAuditSink;
use story_spoiler_client::NoopAuditSink;
use story_spoiler_client::StderrAuditSink;
use story_spoiler_client::StoryClient;
use story_spoiler_config::AuditConfig;
use story_spoiler_config::AuditSinkKind;
use story_spoiler_config::ConfigError;
use story_spoiler_config::SuiteConfig;
use thiserror::Error;

use crate::catalog::story_api_scenarios;
use crate::report::ReportError;
use crate::report::SuiteReport;
use crate::runner::RunnerError;
use crate::runner::SuiteContext;
use crate::runner::SuiteRunner;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a suite run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiteError {
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The audit sink could not be opened.
    #[error("audit sink unavailable: {0}")]
    Audit(String),
    /// Authentication failed; no scenario ran.
    #[error(transparent)]
    Authentication(#[from] AuthError),
    /// The story client could not be built.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The scenario list was inconsistent.
    #[error(transparent)]
    Runner(#[from] RunnerError),
    /// Report artifacts could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Opens the audit sink selected by configuration.
///
/// # Errors
///
/// Returns [`SuiteError::Audit`] when the file sink cannot be opened and
/// [`SuiteError::Config`] when the file sink has no path.
pub fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, SuiteError> {
    match config.sink {
        AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
        AuditSinkKind::File => {
            let path = config.path.as_deref().ok_or_else(|| {
                ConfigError::Invalid("audit.path is required for file sink".to_string())
            })?;
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|err| SuiteError::Audit(err.to_string()))?;
            }
            let sink = FileAuditSink::new(path).map_err(|err| SuiteError::Audit(err.to_string()))?;
            Ok(Arc::new(sink))
        }
    }
}

/// Runs the scenario catalog with the configured audit sink.
///
/// # Errors
///
/// Returns [`SuiteError`] when the run cannot start or artifacts cannot be
/// written. Scenario failures are reported, not returned.
pub fn run_suite(config: &SuiteConfig) -> Result<SuiteReport, SuiteError> {
    let audit = build_audit_sink(&config.audit)?;
    run_suite_with_audit(config, audit)
}

/// Runs the scenario catalog with an explicit audit sink.
///
/// # Errors
///
/// Returns [`SuiteError`] when the run cannot start or artifacts cannot be
/// written. Scenario failures are reported, not returned.
pub fn run_suite_with_audit(
    config: &SuiteConfig,
    audit: Arc<dyn AuditSink>,
) -> Result<SuiteReport, SuiteError> {
    config.validate()?;
    let base_url = config.base_url()?;
    let options = ClientOptions {
        timeout: config.timeout(),
    };
    let runner = SuiteRunner::new(story_api_scenarios(), Arc::clone(&audit))?;

    let authenticator = Authenticator::new(base_url.clone(), &options, Arc::clone(&audit))?;
    let token = authenticator.authenticate(&config.credentials())?;

    let client = StoryClient::new(base_url, token, &options, audit)?;
    let (report, _context) = runner.run(&client, SuiteContext::new());
    drop(client);

    if let Some(path) = &config.report.path {
        report.write_artifacts(path)?;
    }
    Ok(report)
}
