//! Codec trait and implementations for decoding identity payloads.
//!
//! The identity API answers with raw bytes. A "codec" turns those bytes
//! into Rust values. The session layer only talks to the [`Codec`] trait,
//! so a different body format can be dropped in without touching the store.

use serde::de::DeserializeOwned;

use crate::{ProtocolError, UserIdentity};

/// A codec that can decode bytes into Rust types.
///
/// `Send + Sync + 'static` because the codec lives inside the session
/// store, which is shared across tasks.
pub trait Codec: Send + Sync + 'static {
    /// Deserializes bytes into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// Decodes the body of a successful identity response.
    ///
    /// Identity payloads are opaque, so anything the codec can decode is
    /// accepted as-is. Bodies the codec rejects but that are valid UTF-8
    /// become a plain text identity, matching what a browser HTTP client
    /// hands back for `text/plain` responses.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidPayload` if the body is neither
    /// decodable nor UTF-8 text.
    fn decode_identity(
        &self,
        body: &[u8],
    ) -> Result<UserIdentity, ProtocolError> {
        match self.decode::<UserIdentity>(body) {
            Ok(identity) => Ok(identity),
            Err(_) => std::str::from_utf8(body)
                .map(UserIdentity::from)
                .map_err(|e| ProtocolError::InvalidPayload(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// The identity API speaks JSON, so this is the codec the store uses by
/// default.
///
/// ## Example
///
/// ```rust
/// use usergate_protocol::{Codec, JsonCodec, UserIdentity};
///
/// let codec = JsonCodec;
///
/// let identity = codec.decode_identity(br#"{"id": 42}"#).unwrap();
/// assert_eq!(identity, UserIdentity::new(serde_json::json!({"id": 42})));
///
/// // Plain text bodies are kept verbatim.
/// let identity = codec.decode_identity(b"alice").unwrap();
/// assert_eq!(identity.as_str(), Some("alice"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
