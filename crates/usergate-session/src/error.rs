//! Error types for the session layer.

use usergate_protocol::ProtocolError;
use usergate_transport::TransportError;

/// Errors that can occur inside the session layer.
///
/// Store operations never return these: a failed identity fetch is
/// classified as a `SessionError`, logged, and then absorbed into the
/// session state. They do surface from configuration parsing.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The identity API could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The identity API answered with a payload that could not be used.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A mode string was neither development nor production.
    #[error("invalid mode: {0:?} (expected \"development\" or \"production\")")]
    InvalidMode(String),
}
