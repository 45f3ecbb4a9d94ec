//! # usergate
//!
//! Session and authentication state for web application clients.
//!
//! usergate keeps track of who is signed in, logs users in and out
//! against a remote identity API, and reports failures through a
//! pluggable [`Notifier`](usergate_session::Notifier). A development mode
//! runs the same operations fully offline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use usergate::prelude::*;
//!
//! # async fn run() -> Result<(), UsergateError> {
//! usergate::init_tracing();
//!
//! let store = SessionStoreBuilder::new()
//!     .config(Config::from_env()?)
//!     .build(TracingNotifier)?;
//!
//! store.refresh_current_user().await;
//! if let LoginOutcome::Authenticated(user) =
//!     store.log_in(&Credentials::new("alice", "pw")).await
//! {
//!     println!("signed in as {user}");
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;
mod logging;
mod notifier;

pub use builder::{HttpSessionStore, SessionStoreBuilder};
pub use config::{
    Config, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use error::{ConfigError, UsergateError};
pub use logging::{init_tracing, init_tracing_with_filter};
pub use notifier::{ChannelNotifier, TracingNotifier};

pub use usergate_protocol as protocol;
pub use usergate_session as session;
pub use usergate_transport as transport;

pub mod prelude {
    //! Everything an application needs to hold a session.

    pub use crate::{
        ChannelNotifier, Config, HttpSessionStore, SessionStoreBuilder,
        TracingNotifier, UsergateError,
    };
    pub use usergate_protocol::{
        Credentials, Notification, Position, Severity, UserIdentity,
    };
    pub use usergate_session::{
        LoginOutcome, LogoutOutcome, Mode, Notifier, RefreshOutcome,
        SessionConfig, SessionStore,
    };
    pub use usergate_transport::{
        ApiResponse, HttpIdentityApi, IdentityApi, TransportError,
    };
}
