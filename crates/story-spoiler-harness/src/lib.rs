// crates/story-spoiler-harness/src/lib.rs
// ============================================================================
// Module: Story Spoiler Harness Library
// Description: Ordered scenario runner for the Story Spoiler API suite.
// Purpose: Execute the scenario catalog against an authenticated client.
// Dependencies: story-spoiler-client, story-spoiler-config, story-spoiler-core
// ============================================================================

//! ## Overview
//! The harness turns the suite into data. A [`Scenario`] names one HTTP call,
//! its expected status, an optional body check, and an optional state capture.
//! [`SuiteRunner`] executes scenarios strictly in order-index order, threading
//! a [`SuiteContext`] through them and isolating failures per scenario.
//! [`run_suite`] wires configuration, authentication, the client, and the
//! catalog together; an authentication failure aborts before any scenario runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod suite;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::story_api_scenarios;
pub use report::ReportError;
pub use report::ScenarioOutcome;
pub use report::ScenarioStatus;
pub use report::SuiteReport;
pub use runner::RunnerError;
pub use runner::SuiteContext;
pub use runner::SuiteRunner;
pub use scenario::BodyCheck;
pub use scenario::Capture;
pub use scenario::RequestBuilder;
pub use scenario::Scenario;
pub use scenario::ScenarioFailure;
pub use suite::SuiteError;
pub use suite::build_audit_sink;
pub use suite::run_suite;
pub use suite::run_suite_with_audit;
