//! `SessionStoreBuilder`: wires configuration, identity client, and
//! notifier into a ready-to-use session store.

use std::time::Duration;

use usergate_session::{Mode, Notifier, SessionStore};
use usergate_transport::{HttpIdentityApi, IdentityApi};

use crate::{Config, UsergateError};

/// A session store talking to the identity API over HTTP.
pub type HttpSessionStore<N> = SessionStore<HttpIdentityApi, N>;

/// Builder for configuring a session store.
///
/// # Example
///
/// ```rust
/// use usergate::prelude::*;
///
/// let store = SessionStoreBuilder::new()
///     .mode(Mode::Development)
///     .api_url("http://localhost:9000/api/user")
///     .build(TracingNotifier)
///     .unwrap();
///
/// assert_eq!(store.mode(), Mode::Development);
/// assert!(!store.has_user());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStoreBuilder {
    config: Config,
}

impl SessionStoreBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every setting with `config`.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the operating mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Sets the identity API base URL.
    pub fn api_url(mut self, url: &str) -> Self {
        self.config.api_url = url.to_string();
        self
    }

    /// Sets the total time allowed for one identity request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Sets the time allowed to connect to the identity API.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Builds a store backed by [`HttpIdentityApi`].
    ///
    /// The HTTP client is built in both modes; in development mode it is
    /// simply never used.
    ///
    /// # Errors
    /// Returns [`UsergateError::Transport`] if the API URL is not
    /// `http(s)` or the HTTP client cannot be created.
    pub fn build<N: Notifier>(
        self,
        notifier: N,
    ) -> Result<HttpSessionStore<N>, UsergateError> {
        let api = HttpIdentityApi::builder(&self.config.api_url)
            .request_timeout(self.config.request_timeout)
            .connect_timeout(self.config.connect_timeout)
            .build()?;

        tracing::info!(
            mode = %self.config.mode,
            api_url = %api.base_url(),
            "session store ready"
        );
        Ok(self.build_with_api(api, notifier))
    }

    /// Builds a store around a custom identity client. The URL and
    /// timeouts on this builder are not used.
    pub fn build_with_api<A: IdentityApi, N: Notifier>(
        self,
        api: A,
        notifier: N,
    ) -> SessionStore<A, N> {
        SessionStore::new(api, notifier, self.config.session_config())
    }
}
