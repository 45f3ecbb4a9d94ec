/// Errors that can occur in the transport layer.
///
/// Every variant means the same thing to the session store: the request
/// never produced a response. A response with an error status is NOT a
/// `TransportError`; it comes back as an [`ApiResponse`](crate::ApiResponse).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client failed (connect, timeout, body read, bad URL).
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The identity API base URL is unusable.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The remote side could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}
