//! Client-side session state for usergate.
//!
//! This crate holds the one piece of state the application cares about,
//! *who is signed in*, and the three operations that change it:
//!
//! 1. **Refresh** — ask the identity API who the current user is
//!    ([`SessionStore::refresh_current_user`])
//! 2. **Log in** — trade credentials for an identity
//!    ([`SessionStore::log_in`])
//! 3. **Log out** — drop the identity ([`SessionStore::log_out`])
//!
//! Every operation behaves differently in [`Mode::Development`] (offline,
//! mocked) and [`Mode::Production`] (real calls). Failures never surface
//! as errors: they end up as a session state change, an optional
//! [`Notifier`] message, and the returned outcome.
//!
//! # How it fits in the stack
//!
//! ```text
//! UI layer (above)  ← reads current_user(), shows notifications
//!     ↕
//! Session Layer (this crate)  ← owns the current user
//!     ↕
//! Transport + Protocol (below)  ← identity API calls, payload decoding
//! ```

mod error;
mod notifier;
mod session;
mod store;

pub use error::SessionError;
pub use notifier::Notifier;
pub use session::{
    LoginOutcome, LogoutOutcome, Mode, RefreshOutcome, SessionConfig,
};
pub use store::SessionStore;
