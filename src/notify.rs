//! User-facing notifications
//!
//! Failed operations are reported to the user through a [`Notifier`] rather
//! than returned as errors. Delivery is fire-and-forget.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{info, warn};

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// Fixed texts for one failing operation.
///
/// The description is `prefix` followed by the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessages {
    pub title: &'static str,
    pub prefix: &'static str,
}

impl ErrorMessages {
    pub const fn new(title: &'static str, prefix: &'static str) -> Self {
        Self { title, prefix }
    }

    /// The notification for a failure described by `error`
    pub fn notification(&self, error: &dyn fmt::Display) -> Notification {
        Notification {
            title: self.title.to_string(),
            description: format!("{}{}", self.prefix, error),
        }
    }
}

/// Sink for notifications. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        info!(title = %notification.title, "{}", notification.description);
    }
}

/// Forwards notifications to a channel, for a UI loop to drain
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }

    /// A notifier together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!(title = %e.0.title, "notification dropped, receiver is gone");
        }
    }
}
