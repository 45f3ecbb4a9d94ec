//! Ready-made [`Notifier`] implementations.

use tokio::sync::mpsc;
use usergate_protocol::{Notification, Severity};
use usergate_session::Notifier;

/// Writes notifications to the log instead of showing them.
///
/// Negative notifications are logged at `warn`, everything else at
/// `info`. Handy for headless tools and for development.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            severity,
            position,
            message,
            icon,
        } = notification;
        match severity {
            Severity::Negative => tracing::warn!(
                %severity, ?position, %icon, "{message}"
            ),
            _ => tracing::info!(%severity, ?position, %icon, "{message}"),
        }
    }
}

/// Forwards notifications into a channel, for a UI loop to display.
///
/// ```rust
/// use usergate::ChannelNotifier;
/// use usergate::protocol::Notification;
/// use usergate::session::Notifier;
///
/// let (notifier, mut rx) = ChannelNotifier::new();
/// notifier.notify(Notification::login_failed());
/// assert_eq!(rx.try_recv().unwrap().message, "Login failed");
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            // Nobody is listening any more; the UI has gone away.
            tracing::debug!(message = %e.0.message, "notification dropped");
        }
    }
}
