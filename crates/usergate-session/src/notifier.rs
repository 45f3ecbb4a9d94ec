//! Hook for surfacing failures to the user.
//!
//! The session store does not draw anything. When a refresh or login
//! fails it hands a [`Notification`] to a [`Notifier`], and whatever sits
//! behind that trait (a toast widget, a channel into a UI loop, a log
//! line) decides how to show it.

use usergate_protocol::Notification;

/// Shows transient, user-visible messages.
///
/// `notify` is synchronous and fire-and-forget: the store does not wait
/// for the message to be displayed and never learns whether it was.
///
/// Any `Fn(Notification)` closure is a notifier, which keeps tests short:
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use usergate_protocol::Notification;
/// use usergate_session::Notifier;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let notifier = move |n: Notification| sink.lock().unwrap().push(n);
///
/// notifier.notify(Notification::login_failed());
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// ```
pub trait Notifier: Send + Sync + 'static {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification) + Send + Sync + 'static,
{
    fn notify(&self, notification: Notification) {
        self(notification);
    }
}
