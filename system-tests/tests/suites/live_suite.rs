// system-tests/tests/suites/live_suite.rs
// ============================================================================
// Module: Live Suite Tests
// Description: Runs the scenario suite against a deployed service.
// Purpose: Confirm the live Story Spoiler API satisfies all seven scenarios.
// Dependencies: system-tests helpers, story-spoiler-config, story-spoiler-harness
// ============================================================================

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Test suite helpers keep documentation concise."
)]

use std::error::Error;
use std::path::Path;

use helpers::artifacts::TestReporter;
use helpers::artifacts::Verdict;
use story_spoiler_config::ConfigError;
use story_spoiler_config::SuiteConfig;
use story_spoiler_config::SuiteEnv;
use story_spoiler_config::read_env_nonempty;
use story_spoiler_harness::run_suite;

use crate::helpers;

/// Config file read when `STORY_SPOILER_CONFIG` is unset.
const DEFAULT_CONFIG_FILE: &str = "story-spoiler.toml";

/// Loads from a config file when one is named or present, else from the environment.
fn load_live_config() -> Result<SuiteConfig, ConfigError> {
    let named = read_env_nonempty(SuiteEnv::ConfigPath.as_str())?;
    if named.is_some() || Path::new(DEFAULT_CONFIG_FILE).exists() {
        SuiteConfig::load(None)
    } else {
        SuiteConfig::from_env()
    }
}

#[test]
fn live_service_passes_all_scenarios() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("live_service_passes_all_scenarios")?;
    let config = load_live_config()?;

    let report = run_suite(&config)?;
    reporter.artifacts().write_json("suite_report.json", &report)?;
    reporter.artifacts().write_text("suite_report.md", &report.summary_markdown())?;

    if !report.is_success() {
        let notes = report
            .failures()
            .map(|outcome| {
                let detail = outcome.failure.as_ref().map(ToString::to_string).unwrap_or_default();
                format!("{}: {detail}", outcome.name)
            })
            .collect::<Vec<_>>();
        reporter.finish(Verdict::Fail, notes)?;
        let total = report.outcomes.len();
        return Err(format!("{} of {total} scenarios failed", report.failed).into());
    }

    reporter.finish(Verdict::Pass, vec![format!("{} scenarios passed", report.passed)])?;
    Ok(())
}
