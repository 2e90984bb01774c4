// crates/story-spoiler-harness/src/report.rs
// ============================================================================
// Module: Suite Report
// Description: Per-scenario outcomes and suite-level summary artifacts.
// Purpose: Record results and write canonical JSON and Markdown summaries.
// Dependencies: serde, serde_jcs, thiserror
// ============================================================================

//! ## Overview
//! A [`SuiteReport`] lists one [`ScenarioOutcome`] per executed scenario, in
//! execution order. Reports serialize with JCS so identical runs produce
//! byte-identical JSON apart from timings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::scenario::Scenario;
use crate::scenario::ScenarioFailure;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while writing report artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("report io error: {0}")]
    Io(String),
    /// Serialization failure.
    #[error("report encoding error: {0}")]
    Encode(String),
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Pass/fail status of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// All checks passed.
    Passed,
    /// A check failed.
    Failed,
}

impl ScenarioStatus {
    /// Returns the stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Result of one executed scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario order index.
    pub order: u32,
    /// Scenario name.
    pub name: &'static str,
    /// Pass/fail status.
    pub status: ScenarioStatus,
    /// Failure detail when the scenario failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ScenarioFailure>,
    /// Wall-clock duration.
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// Builds an outcome for a scenario.
    #[must_use]
    pub fn new(
        scenario: &Scenario,
        failure: Option<ScenarioFailure>,
        duration_ms: u64,
    ) -> Self {
        let status =
            if failure.is_some() { ScenarioStatus::Failed } else { ScenarioStatus::Passed };
        Self {
            order: scenario.order,
            name: scenario.name,
            status,
            failure,
            duration_ms,
        }
    }

    /// Returns true when the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Passed)
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Outcomes of one suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Run start (Unix milliseconds).
    pub started_at_ms: u64,
    /// Run end (Unix milliseconds).
    pub ended_at_ms: u64,
    /// Number of passed scenarios.
    pub passed: usize,
    /// Number of failed scenarios.
    pub failed: usize,
    /// Outcomes in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Builds a report and derives the pass/fail counts.
    #[must_use]
    pub fn new(started_at_ms: u64, ended_at_ms: u64, outcomes: Vec<ScenarioOutcome>) -> Self {
        let passed = outcomes.iter().filter(|outcome| outcome.passed()).count();
        Self {
            started_at_ms,
            ended_at_ms,
            passed,
            failed: outcomes.len() - passed,
            outcomes,
        }
    }

    /// Returns true when every scenario passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Looks up an outcome by scenario name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    /// Returns the failed outcomes in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    /// Serializes the report as canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Encode`] when serialization fails.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, ReportError> {
        serde_jcs::to_vec(self).map_err(|err| ReportError::Encode(err.to_string()))
    }

    /// Renders a Markdown summary table.
    #[must_use]
    pub fn summary_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Story Spoiler API Suite");
        let _ = writeln!(out);
        let _ = writeln!(out, "- Passed: {}", self.passed);
        let _ = writeln!(out, "- Failed: {}", self.failed);
        let _ = writeln!(out);
        let _ = writeln!(out, "| # | Scenario | Status | Detail |");
        let _ = writeln!(out, "|---|----------|--------|--------|");
        for outcome in &self.outcomes {
            let detail = outcome.failure.as_ref().map(ToString::to_string).unwrap_or_default();
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                outcome.order,
                outcome.name,
                outcome.status.as_str(),
                detail.replace('|', "\\|"),
            );
        }
        out
    }

    /// Writes `<path>` as canonical JSON and `<path>.md` as a summary.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when encoding or writing fails.
    pub fn write_artifacts(&self, path: &Path) -> Result<PathBuf, ReportError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| ReportError::Io(err.to_string()))?;
        }
        let json = self.to_canonical_json()?;
        fs::write(path, json).map_err(|err| ReportError::Io(err.to_string()))?;
        let summary_path = path.with_extension("md");
        fs::write(&summary_path, self.summary_markdown())
            .map_err(|err| ReportError::Io(err.to_string()))?;
        Ok(summary_path)
    }
}
