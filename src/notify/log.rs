//! Notification sink backed by `tracing`.

use super::{Notification, Notifier};

/// Writes each notification as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) {
        tracing::info!(
            previous = %notification.previous_address,
            address = %notification.address,
            "{}: {}",
            notification.title,
            notification.message,
        );
    }
}
