// crates/story-spoiler-core/src/credentials.rs
// ============================================================================
// Module: Credentials and Session Tokens
// Description: Login credentials and the bearer token they produce.
// Purpose: Keep secrets out of debug output and logs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`Credentials`] are supplied once at suite start and exchanged for a
//! [`SessionToken`]. Both types redact their secret material from `Debug`
//! output so they can sit inside configuration and client structs safely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Username/password pair used against the authentication endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username.
    username: String,
    /// Account password.
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Session Token
// ============================================================================

/// Opaque bearer token issued by the authentication endpoint.
///
/// # Invariants
/// - Never empty when produced by the authenticator.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when the token is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}
