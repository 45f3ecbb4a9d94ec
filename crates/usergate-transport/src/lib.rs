//! Identity API client layer for usergate.
//!
//! Provides the [`IdentityApi`] trait: the three calls the session store
//! makes against the remote identity service. Each call either produces
//! an [`ApiResponse`] (any status) or fails with a [`TransportError`]
//! (no response at all). Keeping those two apart is what lets the store
//! tell "the server said no" from "the server never answered".
//!
//! # Feature Flags
//!
//! - `http` (default) — [`HttpIdentityApi`] via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::{HttpIdentityApi, HttpIdentityApiBuilder};

use std::future::Future;
use std::sync::Arc;

/// HTTP 200. The only status the identity API uses for success.
pub const STATUS_OK: u16 = 200;

/// A completed identity API call: the status code and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(STATUS_OK, body)
    }

    /// A bodiless response with the given status.
    pub fn status(status: u16) -> Self {
        Self::new(status, Vec::new())
    }

    /// Returns `true` if the call succeeded. Only `200 OK` counts; other
    /// 2xx codes carry no usable identity payload.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// The remote identity service, as seen by the session store.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → the client is owned by the store, which
///   may be shared across tasks behind an `Arc`.
/// - Returned futures are `Send` so operations can be spawned.
///
/// Implementations can be written with plain `async fn`:
///
/// ```rust
/// use usergate_transport::{ApiResponse, IdentityApi, TransportError};
///
/// /// Rejects every login, never knows who is signed in.
/// struct Offline;
///
/// impl IdentityApi for Offline {
///     async fn current_user(&self) -> Result<ApiResponse, TransportError> {
///         Ok(ApiResponse::status(401))
///     }
///
///     async fn log_in(
///         &self,
///         _account: &str,
///         _password: &str,
///     ) -> Result<ApiResponse, TransportError> {
///         Ok(ApiResponse::status(401))
///     }
///
///     async fn log_out(&self) -> Result<ApiResponse, TransportError> {
///         Err(TransportError::ConnectionFailed("offline".into()))
///     }
/// }
/// ```
pub trait IdentityApi: Send + Sync + 'static {
    /// `GET current-user`: who does the server think is signed in?
    fn current_user(
        &self,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;

    /// `GET login/{account}/{password}`: credentials are passed through
    /// positionally, unescaped.
    fn log_in(
        &self,
        account: &str,
        password: &str,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;

    /// `PUT logout`: only the fact that a response arrived matters.
    fn log_out(
        &self,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

impl<A: IdentityApi> IdentityApi for Arc<A> {
    fn current_user(
        &self,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        (**self).current_user()
    }

    fn log_in(
        &self,
        account: &str,
        password: &str,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        (**self).log_in(account, password)
    }

    fn log_out(
        &self,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        (**self).log_out()
    }
}
