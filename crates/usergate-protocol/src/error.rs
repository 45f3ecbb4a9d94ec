//! Error types for the protocol layer.

/// Errors that can occur while turning response bodies into identities.
///
/// A `ProtocolError` means the identity API answered, but what it sent
/// could not be understood. The session layer treats this the same way as
/// a request that never completed.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Deserialization failed (malformed JSON, wrong shape).
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload is unusable as an identity, e.g. a body that is
    /// neither JSON nor UTF-8 text.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
