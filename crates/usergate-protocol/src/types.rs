//! Core value types shared by the session store and its collaborators.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::fmt;

// ---------------------------------------------------------------------------
// Well-known values
// ---------------------------------------------------------------------------

/// The only account accepted by a development-mode login.
pub const MOCK_ACCOUNT: &str = "mock";

/// The placeholder identity stored by a development-mode login.
pub const MOCK_USER: &str = "Mock User";

/// Message shown when the current user could not be fetched.
pub const FETCH_USER_FAILED: &str = "Could not fetch user information";

/// Message shown when a login attempt did not produce a user.
pub const LOGIN_FAILED: &str = "Login failed";

/// Icon attached to every failure notification.
pub const REPORT_PROBLEM_ICON: &str = "report_problem";

// ---------------------------------------------------------------------------
// UserIdentity
// ---------------------------------------------------------------------------

/// The identity of the signed-in user, exactly as the identity API sent it.
///
/// The store never looks inside this value: it is stored, compared, and
/// handed back verbatim. Wrapping `serde_json::Value` in a newtype keeps
/// that opaqueness visible in signatures.
///
/// `#[serde(transparent)]` serializes it as the inner JSON value, so
/// `{"id": 42}` stays `{"id": 42}` on the way in and out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(Value);

impl UserIdentity {
    /// Wraps an arbitrary JSON payload.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The placeholder identity used in development mode.
    pub fn mock() -> Self {
        Self::from(MOCK_USER)
    }

    /// Returns `true` if this is the development placeholder.
    pub fn is_mock(&self) -> bool {
        self.as_str() == Some(MOCK_USER)
    }

    /// Borrows the raw payload.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the payload as text, if it is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Unwraps into the raw payload.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for UserIdentity {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for UserIdentity {
    fn from(text: &str) -> Self {
        Self(Value::String(text.to_owned()))
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// An account name and password pair submitted by a login form.
///
/// Both parts are carried verbatim; no trimming or escaping happens here.
/// `Debug` is implemented by hand so passwords never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// How a notification should be styled.
///
/// `#[serde(rename_all = "lowercase")]` keeps the names UI toolkits use
/// for their colour palette: `"negative"`, `"positive"`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Negative,
    Warning,
    Info,
    Positive,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Negative => "negative",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Positive => "positive",
        })
    }
}

/// Where on screen a notification should appear.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    Top,
    TopLeft,
    TopRight,
    Bottom,
    BottomLeft,
    BottomRight,
    Center,
}

/// A transient, user-visible message (toast / snackbar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub position: Position,
    pub message: String,
    pub icon: String,
}

impl Notification {
    /// A failure notification: negative severity, shown at the top, with
    /// the "report problem" icon. Every notification this crate family
    /// emits is built with this.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Negative,
            position: Position::Top,
            message: message.into(),
            icon: REPORT_PROBLEM_ICON.to_owned(),
        }
    }

    /// The notification for a failed current-user fetch.
    pub fn fetch_user_failed() -> Self {
        Self::failure(FETCH_USER_FAILED)
    }

    /// The notification for a failed login.
    pub fn login_failed() -> Self {
        Self::failure(LOGIN_FAILED)
    }
}
