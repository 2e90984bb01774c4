// crates/story-spoiler-config/src/config.rs
// ============================================================================
// Module: Story Spoiler Configuration
// Description: Configuration loading and validation for suite runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: story-spoiler-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file, then selected fields are
//! overridden from `STORY_SPOILER_*` environment variables, then the result is
//! validated. A run can also be configured from the environment alone with
//! [`SuiteConfig::from_env`]. Missing or invalid values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use story_spoiler_core::Credentials;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "story-spoiler.toml";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum username length.
pub(crate) const MAX_USERNAME_LENGTH: usize = 256;
/// Maximum password length.
pub(crate) const MAX_PASSWORD_LENGTH: usize = 1024;
/// Minimum client timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum client timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 300_000;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment keys read by the suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Config file path override.
    ConfigPath,
    /// Service base URL override.
    BaseUrl,
    /// Username override.
    Username,
    /// Password override.
    Password,
    /// Client timeout override in milliseconds.
    TimeoutMs,
}

impl SuiteEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "STORY_SPOILER_CONFIG",
            Self::BaseUrl => "STORY_SPOILER_BASE_URL",
            Self::Username => "STORY_SPOILER_USERNAME",
            Self::Password => "STORY_SPOILER_PASSWORD",
            Self::TimeoutMs => "STORY_SPOILER_TIMEOUT_MS",
        }
    }
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Story Spoiler suite configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Target service configuration.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Login credentials.
    #[serde(default)]
    pub auth: AuthConfig,
    /// HTTP client configuration.
    #[serde(default)]
    pub client: ClientConfig,
    /// Audit log configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Target service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the Story Spoiler service.
    #[serde(default)]
    pub base_url: String,
}

/// Login credentials.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Account username.
    #[serde(default)]
    pub username: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Overall request timeout in milliseconds; unset keeps the transport default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard audit events.
    None,
}

/// Audit log configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (required for the file sink).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Report output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Path of the canonical JSON report; a markdown summary is written beside it.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl SuiteConfig {
    /// Loads configuration from disk, applies environment overrides, and validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading, overriding, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::parse(content)?;
        config.apply_overrides(read_env_nonempty)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from environment variables only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is invalid or validation fails.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(read_env_nonempty)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML content without overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the content is not valid config TOML.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies overrides from a key lookup (the process environment in production).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the lookup fails or a timeout is not numeric.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        if let Some(base_url) = lookup(SuiteEnv::BaseUrl.as_str())? {
            self.service.base_url = base_url;
        }
        if let Some(username) = lookup(SuiteEnv::Username.as_str())? {
            self.auth.username = username;
        }
        if let Some(password) = lookup(SuiteEnv::Password.as_str())? {
            self.auth.password = password;
        }
        if let Some(raw) = lookup(SuiteEnv::TimeoutMs.as_str())? {
            let timeout_ms = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{} must be an integer number of milliseconds",
                    SuiteEnv::TimeoutMs.as_str()
                ))
            })?;
            self.client.timeout_ms = Some(timeout_ms);
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        self.auth.validate()?;
        self.client.validate()?;
        self.audit.validate()?;
        self.report.validate()?;
        Ok(())
    }

    /// Returns the parsed service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base URL is not usable.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.service.parsed_base_url()
    }

    /// Returns the configured credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.auth.username.clone(), self.auth.password.clone())
    }

    /// Returns the configured client timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.client.timeout_ms.map(Duration::from_millis)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl ServiceConfig {
    /// Parses and checks the base URL.
    fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("service.base_url must be set".to_string()));
        }
        let url = Url::parse(trimmed)
            .map_err(|err| ConfigError::Invalid(format!("service.base_url is invalid: {err}")))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid(format!(
                    "service.base_url scheme must be http or https, got {scheme}"
                )));
            }
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Invalid("service.base_url must include a host".to_string()));
        }
        Ok(url)
    }

    /// Validates the service section.
    fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url().map(|_| ())
    }
}

impl AuthConfig {
    /// Validates the credentials section.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.username must be set".to_string()));
        }
        if self.username.len() > MAX_USERNAME_LENGTH {
            return Err(ConfigError::Invalid("auth.username too long".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Invalid("auth.password must be set".to_string()));
        }
        if self.password.len() > MAX_PASSWORD_LENGTH {
            return Err(ConfigError::Invalid("auth.password too long".to_string()));
        }
        Ok(())
    }
}

impl ClientConfig {
    /// Validates the client section.
    fn validate(self) -> Result<(), ConfigError> {
        if let Some(timeout_ms) = self.timeout_ms
            && !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms)
        {
            return Err(ConfigError::Invalid(format!(
                "client.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

impl AuditConfig {
    /// Validates the audit section.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (_, Some(path)) => validate_path(path),
            (_, None) => Ok(()),
        }
    }
}

impl ReportConfig {
    /// Validates the report section.
    fn validate(&self) -> Result<(), ConfigError> {
        self.path.as_deref().map_or(Ok(()), validate_path)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit path or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = read_env_nonempty(SuiteEnv::ConfigPath.as_str())? {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid("path must not be empty".to_string()));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("path component too long".to_string()));
        }
    }
    Ok(())
}

/// Reads an environment variable, enforcing UTF-8 and rejecting empty values.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the variable is not UTF-8 or is blank.
pub fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    let Some(raw) = std::env::var_os(name) else {
        return Ok(None);
    };
    let value = raw
        .into_string()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{name} must not be empty")));
    }
    Ok(Some(value))
}
