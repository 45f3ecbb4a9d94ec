//! Wire-level types for usergate.
//!
//! This crate defines the values that cross the boundary between the
//! session store and its collaborators:
//!
//! - **Types** ([`UserIdentity`], [`Credentials`], [`Notification`]) —
//!   what the identity API hands back, what a login carries, and what
//!   the user gets to see when something goes wrong.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how response bodies are
//!   turned into identities.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! ```text
//! Transport (status + bytes) → Protocol (UserIdentity) → Session (current user)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    Credentials, Notification, Position, Severity, UserIdentity,
    FETCH_USER_FAILED, LOGIN_FAILED, MOCK_ACCOUNT, MOCK_USER,
    REPORT_PROBLEM_ICON,
};
