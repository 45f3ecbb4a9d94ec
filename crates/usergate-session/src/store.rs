//! The session store: the current user and the operations that change it.
//!
//! # Concurrency note
//!
//! The current user lives in a `tokio::sync::watch` channel. Reads are
//! synchronous and never wait on an in-flight request; each operation
//! writes at most once, after its request has settled, with a single
//! `send_replace`. Overlapping operations are not serialized: whichever
//! settles last wins.

use std::future::Future;

use tokio::sync::watch;
use usergate_protocol::{
    Codec, Credentials, JsonCodec, Notification, UserIdentity, MOCK_ACCOUNT,
};
use usergate_transport::{ApiResponse, IdentityApi, TransportError};

use crate::{
    LoginOutcome, LogoutOutcome, Mode, Notifier, RefreshOutcome,
    SessionConfig, SessionError,
};

/// Holds the signed-in user and mediates login/logout against an
/// [`IdentityApi`].
///
/// ## Lifecycle
///
/// ```text
///              log_in() ok / refresh() ok
///   [NoUser] ─────────────────────────────→ [HasUser(identity)]
///       ↑                                          │
///       └──── log_out() / refresh() non-success ───┘
///              / log_in() failed
/// ```
///
/// The store starts in `NoUser` and lives as long as the application.
pub struct SessionStore<A, N, C = JsonCodec>
where
    A: IdentityApi,
    N: Notifier,
    C: Codec,
{
    api: A,
    notifier: N,
    codec: C,
    config: SessionConfig,
    current_user: watch::Sender<Option<UserIdentity>>,
}

impl<A, N> SessionStore<A, N>
where
    A: IdentityApi,
    N: Notifier,
{
    /// Creates a store with no user, decoding payloads as JSON.
    pub fn new(api: A, notifier: N, config: SessionConfig) -> Self {
        Self::with_codec(api, notifier, JsonCodec, config)
    }
}

impl<A, N, C> SessionStore<A, N, C>
where
    A: IdentityApi,
    N: Notifier,
    C: Codec,
{
    /// Creates a store with no user and a custom payload codec.
    pub fn with_codec(
        api: A,
        notifier: N,
        codec: C,
        config: SessionConfig,
    ) -> Self {
        let (current_user, _) = watch::channel(None);
        tracing::debug!(mode = %config.mode, "session store created");
        Self {
            api,
            notifier,
            codec,
            config,
            current_user,
        }
    }

    /// The mode this store was built with.
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The identity client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.current_user.borrow().clone()
    }

    /// Returns `true` if someone is signed in.
    pub fn has_user(&self) -> bool {
        self.current_user.borrow().is_some()
    }

    /// Watches the current user. The receiver sees every committed
    /// change, never an in-flight one.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.current_user.subscribe()
    }

    /// Re-synchronizes the session with the server's idea of who is
    /// signed in.
    ///
    /// - Development: does nothing, whatever the current state.
    /// - Production, `200 OK`: the returned identity becomes the user.
    /// - Production, other status: the session is cleared.
    /// - Production, no response: the session is kept and the user sees
    ///   "Could not fetch user information".
    pub async fn refresh_current_user(&self) -> RefreshOutcome {
        if self.config.mode.is_development() {
            tracing::debug!("development mode: current user refresh skipped");
            return RefreshOutcome::Skipped;
        }

        match self.fetch_identity(self.api.current_user()).await {
            Ok(Some(identity)) => {
                self.commit(Some(identity.clone()));
                RefreshOutcome::Refreshed(identity)
            }
            Ok(None) => {
                self.commit(None);
                RefreshOutcome::Cleared
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not fetch current user");
                self.notifier.notify(Notification::fetch_user_failed());
                RefreshOutcome::Failed
            }
        }
    }

    /// Attempts to sign in.
    ///
    /// - Development: only the `"mock"` account succeeds (any password),
    ///   storing the placeholder identity. Any other account leaves the
    ///   session untouched.
    /// - Production: a `200 OK` stores the returned identity; anything
    ///   else, including a request that never completed, clears the
    ///   session.
    ///
    /// A [`LoginOutcome::Failed`] is always accompanied by exactly one
    /// "Login failed" notification.
    pub async fn log_in(&self, credentials: &Credentials) -> LoginOutcome {
        if self.config.mode.is_development() {
            return self.mock_log_in(credentials);
        }

        let request =
            self.api.log_in(&credentials.account, &credentials.password);
        let identity = match self.fetch_identity(request).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(
                    account = %credentials.account,
                    error = %e,
                    "login request failed"
                );
                None
            }
        };

        self.commit(identity.clone());

        match identity {
            Some(identity) => {
                tracing::info!(account = %credentials.account, "logged in");
                LoginOutcome::Authenticated(identity)
            }
            None => {
                self.notifier.notify(Notification::login_failed());
                LoginOutcome::Failed
            }
        }
    }

    /// Signs out.
    ///
    /// - Development: clears the session, no request.
    /// - Production: any response clears the session, whatever its
    ///   status. If the request never completed the session is kept.
    pub async fn log_out(&self) -> LogoutOutcome {
        if self.config.mode.is_development() {
            tracing::info!("development mode: removing mock user data");
            self.commit(None);
            return LogoutOutcome::LoggedOut;
        }

        match self.api.log_out().await {
            Ok(response) => {
                tracing::debug!(status = response.status, "logout acknowledged");
                self.commit(None);
                LogoutOutcome::LoggedOut
            }
            Err(e) => {
                tracing::warn!(error = %e, "logout request failed");
                LogoutOutcome::Failed
            }
        }
    }

    fn mock_log_in(&self, credentials: &Credentials) -> LoginOutcome {
        if credentials.account == MOCK_ACCOUNT {
            tracing::info!(
                account = %credentials.account,
                "development mode: adding mock account"
            );
            let identity = UserIdentity::mock();
            self.commit(Some(identity.clone()));
            return LoginOutcome::Authenticated(identity);
        }

        self.notifier.notify(Notification::login_failed());
        LoginOutcome::Failed
    }

    /// Runs an identity request and classifies what came back:
    /// `Ok(Some)` on `200 OK`, `Ok(None)` on any other status, `Err` when
    /// there was no response or the payload was unusable.
    async fn fetch_identity(
        &self,
        request: impl Future<Output = Result<ApiResponse, TransportError>>,
    ) -> Result<Option<UserIdentity>, SessionError> {
        let response = request.await?;
        if !response.is_success() {
            return Ok(None);
        }
        Ok(Some(self.codec.decode_identity(&response.body)?))
    }

    fn commit(&self, user: Option<UserIdentity>) {
        let signed_in = user.is_some();
        self.current_user.send_replace(user);
        tracing::trace!(signed_in, "session updated");
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionStore`, one block per operation and mode.
    //!
    //! The identity API is scripted: each call pops the next canned
    //! result, and every call is counted so development-mode tests can
    //! prove nothing went over the wire.

    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use usergate_protocol::Severity;

    // -- Helpers ----------------------------------------------------------

    type Reply = Result<ApiResponse, TransportError>;

    #[derive(Default)]
    struct ScriptedApi {
        replies: Mutex<VecDeque<Reply>>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn next(&self) -> Reply {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected identity API call")
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl IdentityApi for ScriptedApi {
        async fn current_user(&self) -> Reply {
            self.next()
        }

        async fn log_in(&self, _account: &str, _password: &str) -> Reply {
            self.next()
        }

        async fn log_out(&self) -> Reply {
            self.next()
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Notification>>>);

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().iter().map(|n| n.message.clone()).collect()
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn ok(body: &str) -> Reply {
        Ok(ApiResponse::ok(body))
    }

    fn status(code: u16) -> Reply {
        Ok(ApiResponse::status(code))
    }

    fn unreachable() -> Reply {
        Err(TransportError::ConnectionFailed("connection refused".into()))
    }

    fn user(id: u64) -> UserIdentity {
        UserIdentity::new(json!({ "id": id }))
    }

    fn creds(account: &str, password: &str) -> Credentials {
        Credentials::new(account, password)
    }

    /// Collects formatted log output for the current thread.
    ///
    /// `#[tokio::test]` runs on a single-threaded runtime, so a
    /// thread-local default subscriber sees every event the store emits.
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogCapture {
        fn install(&self) -> tracing::subscriber::DefaultGuard {
            let sink = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || sink.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::WARN)
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn warnings(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .filter(|line| line.contains("WARN"))
                .map(str::to_owned)
                .collect()
        }
    }

    fn dev_store() -> (SessionStore<ScriptedApi, Recorder>, Recorder) {
        let recorder = Recorder::default();
        let store = SessionStore::new(
            ScriptedApi::default(),
            recorder.clone(),
            SessionConfig::development(),
        );
        (store, recorder)
    }

    fn prod_store(
        replies: impl IntoIterator<Item = Reply>,
    ) -> (SessionStore<ScriptedApi, Recorder>, Recorder) {
        let recorder = Recorder::default();
        let store = SessionStore::new(
            ScriptedApi::replying(replies),
            recorder.clone(),
            SessionConfig::production(),
        );
        (store, recorder)
    }

    // =====================================================================
    // Initial state
    // =====================================================================

    #[test]
    fn test_new_store_has_no_user() {
        let (store, _) = dev_store();
        assert_eq!(store.current_user(), None);
        assert!(!store.has_user());
        assert_eq!(store.mode(), Mode::Development);
    }

    // =====================================================================
    // Development mode
    // =====================================================================

    #[tokio::test]
    async fn test_dev_refresh_without_user_stays_empty() {
        let (store, recorder) = dev_store();

        let outcome = store.refresh_current_user().await;

        assert_eq!(outcome, RefreshOutcome::Skipped);
        assert_eq!(store.current_user(), None);
        assert_eq!(store.api().calls(), 0);
        assert!(recorder.messages().is_empty());
    }

    #[tokio::test]
    async fn test_dev_refresh_keeps_mock_user() {
        let (store, _) = dev_store();
        store.log_in(&creds("mock", "")).await;

        let outcome = store.refresh_current_user().await;

        assert_eq!(outcome, RefreshOutcome::Skipped);
        assert_eq!(store.current_user(), Some(UserIdentity::mock()));
    }

    #[tokio::test]
    async fn test_dev_log_in_mock_any_password_authenticates() {
        for password in ["", "secret", "mock"] {
            let (store, recorder) = dev_store();

            let outcome = store.log_in(&creds("mock", password)).await;

            assert_eq!(outcome, LoginOutcome::Authenticated(UserIdentity::mock()));
            assert_eq!(store.current_user(), Some(UserIdentity::mock()));
            assert!(recorder.messages().is_empty());
            assert_eq!(store.api().calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_dev_log_in_other_account_fails_and_notifies_once() {
        let (store, recorder) = dev_store();

        let outcome = store.log_in(&creds("alice", "pw")).await;

        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(store.current_user(), None);
        assert_eq!(recorder.messages(), vec!["Login failed"]);
        assert_eq!(store.api().calls(), 0);
    }

    #[tokio::test]
    async fn test_dev_failed_log_in_keeps_existing_user() {
        let (store, recorder) = dev_store();
        store.log_in(&creds("mock", "")).await;

        let outcome = store.log_in(&creds("Mock", "pw")).await;

        // Account matching is exact; the earlier mock user survives.
        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(store.current_user(), Some(UserIdentity::mock()));
        assert_eq!(recorder.messages(), vec!["Login failed"]);
    }

    #[tokio::test]
    async fn test_dev_log_out_clears_user() {
        let (store, _) = dev_store();
        store.log_in(&creds("mock", "")).await;

        let outcome = store.log_out().await;

        assert_eq!(outcome, LogoutOutcome::LoggedOut);
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn test_dev_log_out_without_user_still_succeeds() {
        let (store, _) = dev_store();

        assert_eq!(store.log_out().await, LogoutOutcome::LoggedOut);
        assert_eq!(store.current_user(), None);
        assert_eq!(store.api().calls(), 0);
    }

    // =====================================================================
    // Production: refresh_current_user()
    // =====================================================================

    #[tokio::test]
    async fn test_prod_refresh_success_sets_user() {
        let (store, recorder) = prod_store([ok(r#"{"id": 7}"#)]);

        let outcome = store.refresh_current_user().await;

        assert_eq!(outcome, RefreshOutcome::Refreshed(user(7)));
        assert_eq!(store.current_user(), Some(user(7)));
        assert!(recorder.messages().is_empty());
    }

    #[tokio::test]
    async fn test_prod_refresh_replaces_previous_user() {
        let (store, _) = prod_store([ok(r#"{"id": 1}"#), ok(r#"{"id": 2}"#)]);

        store.refresh_current_user().await;
        store.refresh_current_user().await;

        assert_eq!(store.current_user(), Some(user(2)));
    }

    #[tokio::test]
    async fn test_prod_refresh_non_success_clears_user() {
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), status(401)]);
        store.refresh_current_user().await;

        let outcome = store.refresh_current_user().await;

        assert_eq!(outcome, RefreshOutcome::Cleared);
        assert_eq!(store.current_user(), None);
        assert!(recorder.messages().is_empty());
    }

    #[tokio::test]
    async fn test_prod_refresh_non_200_success_status_clears_user() {
        let (store, _) = prod_store([ok(r#"{"id": 1}"#), status(204)]);
        store.refresh_current_user().await;

        assert_eq!(store.refresh_current_user().await, RefreshOutcome::Cleared);
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn test_prod_refresh_transport_failure_keeps_user_and_notifies() {
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), unreachable()]);
        store.refresh_current_user().await;

        let outcome = store.refresh_current_user().await;

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert_eq!(store.current_user(), Some(user(1)));
        assert_eq!(
            recorder.messages(),
            vec!["Could not fetch user information"]
        );
    }

    #[tokio::test]
    async fn test_prod_refresh_notification_is_negative() {
        let (store, recorder) = prod_store([unreachable()]);

        store.refresh_current_user().await;

        let seen = recorder.0.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Negative);
        assert_eq!(seen[0].icon, "report_problem");
    }

    #[tokio::test]
    async fn test_prod_refresh_undecodable_payload_treated_as_failure() {
        let bad = Ok(ApiResponse::ok(vec![0xff, 0xfe, 0x00]));
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), bad]);
        store.refresh_current_user().await;

        assert_eq!(store.refresh_current_user().await, RefreshOutcome::Failed);
        assert_eq!(store.current_user(), Some(user(1)));
        assert_eq!(recorder.messages().len(), 1);
    }

    // =====================================================================
    // Production: log_in()
    // =====================================================================

    #[tokio::test]
    async fn test_prod_log_in_success_sets_user_without_notification() {
        let (store, recorder) = prod_store([ok(r#"{"id": 42}"#)]);

        let outcome = store.log_in(&creds("alice", "pw")).await;

        assert_eq!(outcome, LoginOutcome::Authenticated(user(42)));
        assert_eq!(store.current_user(), Some(user(42)));
        assert!(recorder.messages().is_empty());
        assert_eq!(store.api().calls(), 1);
    }

    #[tokio::test]
    async fn test_prod_log_in_mock_account_goes_over_the_wire() {
        let (store, recorder) = prod_store([status(401)]);

        let outcome = store.log_in(&creds("mock", "pw")).await;

        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(store.api().calls(), 1);
        assert_eq!(recorder.messages(), vec!["Login failed"]);
    }

    #[tokio::test]
    async fn test_prod_log_in_non_success_clears_user_and_notifies_once() {
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), status(403)]);
        store.refresh_current_user().await;

        let outcome = store.log_in(&creds("alice", "wrong")).await;

        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(store.current_user(), None);
        assert_eq!(recorder.messages(), vec!["Login failed"]);
    }

    #[tokio::test]
    async fn test_prod_log_in_transport_failure_clears_user_and_notifies_once() {
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), unreachable()]);
        store.refresh_current_user().await;

        let outcome = store.log_in(&creds("alice", "pw")).await;

        assert_eq!(outcome, LoginOutcome::Failed);
        assert_eq!(store.current_user(), None);
        assert_eq!(recorder.messages(), vec!["Login failed"]);
    }

    #[tokio::test]
    async fn test_prod_log_in_plain_text_identity_is_kept() {
        let (store, _) = prod_store([ok("alice")]);

        let outcome = store.log_in(&creds("alice", "pw")).await;

        assert_eq!(outcome, LoginOutcome::Authenticated(UserIdentity::from("alice")));
    }

    // =====================================================================
    // Production: log_out()
    // =====================================================================

    #[tokio::test]
    async fn test_prod_log_out_success_clears_user() {
        let (store, _) = prod_store([ok(r#"{"id": 1}"#), status(200)]);
        store.log_in(&creds("alice", "pw")).await;

        assert_eq!(store.log_out().await, LogoutOutcome::LoggedOut);
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn test_prod_log_out_error_status_still_clears_user() {
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), status(500)]);
        store.log_in(&creds("alice", "pw")).await;

        assert_eq!(store.log_out().await, LogoutOutcome::LoggedOut);
        assert_eq!(store.current_user(), None);
        assert!(recorder.messages().is_empty());
    }

    #[tokio::test]
    async fn test_prod_log_out_transport_failure_keeps_user() {
        let (store, recorder) = prod_store([ok(r#"{"id": 1}"#), unreachable()]);
        store.log_in(&creds("alice", "pw")).await;

        assert_eq!(store.log_out().await, LogoutOutcome::Failed);
        assert_eq!(store.current_user(), Some(user(1)));
        assert!(recorder.messages().is_empty());
    }

    // =====================================================================
    // Diagnostics: transport failures are logged, rejections are not
    // =====================================================================

    #[tokio::test]
    async fn test_refresh_transport_failure_logs_warning() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (store, _) = prod_store([unreachable()]);

        store.refresh_current_user().await;

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_refresh_non_success_logs_nothing() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (store, _) = prod_store([status(401)]);

        store.refresh_current_user().await;

        assert!(logs.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_log_in_transport_failure_logs_warning() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (store, _) = prod_store([unreachable()]);

        store.log_in(&creds("alice", "hunter2")).await;

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("connection refused"));
        assert!(!warnings[0].contains("hunter2"));
    }

    #[tokio::test]
    async fn test_log_in_non_success_logs_nothing() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (store, _) = prod_store([status(403)]);

        store.log_in(&creds("alice", "wrong")).await;

        assert!(logs.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_log_out_transport_failure_logs_warning() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (store, _) = prod_store([unreachable()]);

        store.log_out().await;

        let warnings = logs.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_log_out_error_status_logs_nothing() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let (store, _) = prod_store([status(500)]);

        store.log_out().await;

        assert!(logs.warnings().is_empty());
    }

    // =====================================================================
    // Observation
    // =====================================================================

    #[tokio::test]
    async fn test_subscribe_sees_committed_changes() {
        let (store, _) = dev_store();
        let mut rx = store.subscribe();

        store.log_in(&creds("mock", "")).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Some(UserIdentity::mock()));

        store.log_out().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }
}
