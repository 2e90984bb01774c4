// crates/story-spoiler-harness/src/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: Strictly ordered, failure-isolated scenario execution.
// Purpose: Thread suite state through scenarios and collect outcomes.
// Dependencies: story-spoiler-client, story-spoiler-core, thiserror
// ============================================================================

//! ## Overview
//! [`SuiteRunner`] sorts scenarios by order index once, at construction, and
//! rejects duplicate indices. A run executes every scenario exactly once in
//! that order. A failing scenario is recorded and the run continues; later
//! scenarios that depend on missing state fail with their own precondition
//! error without issuing a request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use story_spoiler_client::AuditSink;
use story_spoiler_client::RequestExecutor;
use story_spoiler_client::ScenarioAuditEvent;
use story_spoiler_client::elapsed_millis;
use story_spoiler_client::now_millis;
use story_spoiler_core::SuiteState;
use thiserror::Error;

use crate::report::ScenarioOutcome;
use crate::report::SuiteReport;
use crate::scenario::Scenario;
use crate::scenario::ScenarioFailure;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Mutable context shared by the scenarios of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteContext {
    /// Cross-scenario state.
    pub state: SuiteState,
}

impl SuiteContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SuiteState::new(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while assembling a runner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    /// Two scenarios share an order index.
    #[error("duplicate scenario order {order}: {first} and {second}")]
    DuplicateOrder {
        /// Shared order index.
        order: u32,
        /// Name of the first scenario with the index.
        first: &'static str,
        /// Name of the second scenario with the index.
        second: &'static str,
    },
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Executes scenarios in ascending order.
pub struct SuiteRunner {
    /// Scenarios sorted by order index.
    scenarios: Vec<Scenario>,
    /// Audit sink for scenario results.
    audit: Arc<dyn AuditSink>,
}

impl SuiteRunner {
    /// Builds a runner from an unordered scenario list.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::DuplicateOrder`] when two scenarios share an
    /// order index.
    pub fn new(
        mut scenarios: Vec<Scenario>,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, RunnerError> {
        scenarios.sort_by_key(|scenario| scenario.order);
        if let Some(pair) = scenarios.windows(2).find(|pair| pair[0].order == pair[1].order) {
            return Err(RunnerError::DuplicateOrder {
                order: pair[0].order,
                first: pair[0].name,
                second: pair[1].name,
            });
        }
        Ok(Self {
            scenarios,
            audit,
        })
    }

    /// Runs every scenario once and returns the report and final context.
    #[must_use]
    pub fn run<E>(&self, executor: &E, mut context: SuiteContext) -> (SuiteReport, SuiteContext)
    where
        E: RequestExecutor + ?Sized,
    {
        let started_at_ms = now_millis();
        let mut outcomes = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            let started = Instant::now();
            let result = run_scenario(scenario, executor, &mut context);
            let duration_ms = elapsed_millis(started);
            let failure = result.err();
            self.audit.record_scenario(&ScenarioAuditEvent::new(
                scenario.order,
                scenario.name,
                failure.as_ref().map(ToString::to_string),
                duration_ms,
            ));
            outcomes.push(ScenarioOutcome::new(scenario, failure, duration_ms));
        }
        (SuiteReport::new(started_at_ms, now_millis(), outcomes), context)
    }
}

/// Builds, sends, and evaluates one scenario.
fn run_scenario<E>(
    scenario: &Scenario,
    executor: &E,
    context: &mut SuiteContext,
) -> Result<(), ScenarioFailure>
where
    E: RequestExecutor + ?Sized,
{
    let request = (scenario.build_request)(context)?;
    let response = executor.execute(&request)?;
    scenario.evaluate(&response, context)
}
