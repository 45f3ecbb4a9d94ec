//! Unified error type for usergate.

use usergate_session::SessionError;
use usergate_transport::TransportError;

/// Problems with the environment-driven configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `USERGATE_MODE` is set to something other than a known mode.
    #[error("{var}: {source}")]
    InvalidMode {
        var: &'static str,
        #[source]
        source: SessionError,
    },

    /// A numeric setting could not be parsed.
    #[error("{var}: expected a positive number of seconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// The identity API URL is empty.
    #[error("{var} must not be empty")]
    EmptyUrl { var: &'static str },
}

/// Top-level error for setting up a session store.
///
/// Session operations themselves never fail; this only comes out of
/// setting things up (configuration, building the HTTP client).
#[derive(Debug, thiserror::Error)]
pub enum UsergateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
