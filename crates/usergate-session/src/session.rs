//! Session types: operating mode, configuration, and operation outcomes.

use std::fmt;
use std::str::FromStr;

use usergate_protocol::UserIdentity;

use crate::SessionError;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which code path the store runs.
///
/// - **Development**: offline. Logins are mocked, refreshes do nothing,
///   logouts only clear local state.
/// - **Production**: every operation goes through the identity API.
///
/// The mode is fixed when the store is built and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// `Development` for debug builds, `Production` for release builds.
    pub fn from_build_profile() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Returns `true` in development mode.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::from_build_profile()
    }
}

impl FromStr for Mode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(SessionError::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration injected into a [`SessionStore`](crate::SessionStore).
///
/// Operations read the mode from here and nowhere else, so both code
/// paths can be exercised in the same test binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
}

impl SessionConfig {
    pub fn development() -> Self {
        Self {
            mode: Mode::Development,
        }
    }

    pub fn production() -> Self {
        Self {
            mode: Mode::Production,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What [`refresh_current_user`](crate::SessionStore::refresh_current_user)
/// did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Development mode: nothing was asked, nothing changed.
    Skipped,
    /// The API named a user; it is now the current user.
    Refreshed(UserIdentity),
    /// The API answered with a non-success status; the session is empty.
    Cleared,
    /// The request never completed. The session was left as it was and
    /// the user was notified.
    Failed,
}

/// What [`log_in`](crate::SessionStore::log_in) did to the session.
///
/// `Authenticated` is the signal to close a login dialog. `Failed` always
/// comes with exactly one "Login failed" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(UserIdentity),
    Failed,
}

impl LoginOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The identity that signed in, if any.
    pub fn identity(&self) -> Option<&UserIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Failed => None,
        }
    }
}

/// What [`log_out`](crate::SessionStore::log_out) did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The session is now empty.
    LoggedOut,
    /// The request never completed; the session was left as it was.
    Failed,
}
