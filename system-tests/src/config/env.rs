// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Artifact root and timeout floor for Story Spoiler system tests.
// Purpose: Resolve per-test artifact directories and client timeouts.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Two optional variables shape a system-test run: where artifacts land and
//! the minimum client timeout. Values are read through a lookup function so
//! tests can supply them without touching the process environment. A variable
//! that is set must be valid UTF-8 and non-blank, and the timeout must be a
//! positive number of seconds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use thiserror::Error;

// ============================================================================
// SECTION: Variables
// ============================================================================

/// Default artifact root, relative to the crate under test.
const DEFAULT_ARTIFACT_ROOT: &str = "target/system-tests";

/// Variables read by [`SystemTestConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestVar {
    /// Directory that receives one subdirectory per test.
    ArtifactRoot,
    /// Minimum client timeout in seconds.
    TimeoutFloorSeconds,
}

impl SystemTestVar {
    /// Returns the environment variable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ArtifactRoot => "STORY_SPOILER_SYSTEM_TEST_RUN_ROOT",
            Self::TimeoutFloorSeconds => "STORY_SPOILER_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

/// Rejected system-test variable values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SystemTestEnvError {
    /// Value is not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    NotUnicode(&'static str),
    /// Value is set but blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// Timeout is not a positive integer.
    #[error("{name} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Settings for one system-test process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Artifact root override.
    pub artifact_root: Option<PathBuf>,
    /// Lower bound applied to requested timeouts.
    pub timeout_floor: Option<Duration>,
}

impl SystemTestConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SystemTestEnvError`] when a set variable is invalid.
    pub fn load() -> Result<Self, SystemTestEnvError> {
        Self::from_lookup(process_var)
    }

    /// Reads settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemTestEnvError`] when a set variable is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SystemTestEnvError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let artifact_root = read_var(&lookup, SystemTestVar::ArtifactRoot)?.map(PathBuf::from);
        let timeout_floor = read_var(&lookup, SystemTestVar::TimeoutFloorSeconds)?
            .map(|value| parse_seconds(SystemTestVar::TimeoutFloorSeconds.name(), &value))
            .transpose()?;
        Ok(Self {
            artifact_root,
            timeout_floor,
        })
    }

    /// Returns `requested`, raised to the configured floor.
    #[must_use]
    pub fn effective_timeout(&self, requested: Duration) -> Duration {
        self.timeout_floor.map_or(requested, |floor| requested.max(floor))
    }

    /// Returns the artifact directory for `test_name`.
    ///
    /// Without an override, each process gets a fresh `run_<millis>` directory.
    #[must_use]
    pub fn artifact_dir(&self, test_name: &str) -> PathBuf {
        let root = self.artifact_root.clone().unwrap_or_else(|| {
            let stamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
            PathBuf::from(DEFAULT_ARTIFACT_ROOT).join(format!("run_{}", stamp.as_millis()))
        });
        root.join(test_name)
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Reads a variable from the process environment.
fn process_var(name: &str) -> Option<OsString> {
    std::env::var_os(name)
}

/// Returns the value of `var`, rejecting non-UTF-8 and blank values.
fn read_var<F>(lookup: &F, var: SystemTestVar) -> Result<Option<String>, SystemTestEnvError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let Some(raw) = lookup(var.name()) else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| SystemTestEnvError::NotUnicode(var.name()))?;
    if value.trim().is_empty() {
        return Err(SystemTestEnvError::Empty(var.name()));
    }
    Ok(Some(value))
}

/// Parses a positive whole number of seconds.
fn parse_seconds(name: &'static str, raw: &str) -> Result<Duration, SystemTestEnvError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(SystemTestEnvError::InvalidTimeout {
            name,
            value: raw.to_string(),
        }),
    }
}
