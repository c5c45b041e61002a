//! Notification sinks for address changes.
//!
//! This module provides:
//! - The notification value ([`Notification`])
//! - The sink abstraction ([`Notifier`])
//! - A `tracing`-backed sink ([`LogNotifier`])
//! - An HTTP webhook sink with Handlebars bodies ([`WebhookNotifier`])
//!
//! Sinks are fire-and-forget: delivery failures are logged by the sink and
//! never reach the monitor.

mod error;
mod log;
mod notification;
mod webhook;

#[cfg(test)]
mod webhook_tests;

pub use error::NotifyError;
pub use log::LogNotifier;
pub use notification::{CHANGE_TITLE, Notification, Notifier};
pub use webhook::{DEFAULT_WEBHOOK_TIMEOUT, WebhookNotifier};
