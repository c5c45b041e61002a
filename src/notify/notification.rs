//! Notification value and sink trait.

use serde::Serialize;

use crate::lookup::GeoInfo;

/// Title used for address change notifications.
pub const CHANGE_TITLE: &str = "IP Change Detected";

/// A one-shot, user-visible alert.
///
/// `title` and `message` are what a desktop sink shows; the remaining
/// fields are exposed to webhook body templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Alert title
    pub title: String,
    /// Alert body
    pub message: String,
    /// Newly observed address
    pub address: String,
    /// Address observed before the change
    pub previous_address: String,
    /// Country name for `address`, empty if unknown
    pub country: String,
    /// Lowercase country code for `address`, empty if unknown
    pub country_code: String,
}

impl Notification {
    /// Builds the alert for a change from `previous` to `address`.
    ///
    /// The country is appended in parentheses only when known.
    #[must_use]
    pub fn address_changed(previous: &str, address: &str, geo: &GeoInfo) -> Self {
        let message = if geo.country.is_empty() {
            format!("Your IP has changed to {address}")
        } else {
            format!("Your IP has changed to {address} ({})", geo.country)
        };

        Self {
            title: CHANGE_TITLE.to_string(),
            message,
            address: address.to_string(),
            previous_address: previous.to_string(),
            country: geo.country.clone(),
            country_code: geo.country_code.clone(),
        }
    }
}

/// Delivers notifications to the user.
pub trait Notifier: Send + Sync {
    /// Delivers `notification`. Failures are handled by the implementation.
    fn notify(&self, notification: &Notification)
    -> impl std::future::Future<Output = ()> + Send;
}

/// An absent notifier does nothing.
impl<N: Notifier> Notifier for Option<N> {
    async fn notify(&self, notification: &Notification) {
        if let Some(inner) = self {
            inner.notify(notification).await;
        }
    }
}

/// Delivers to both sinks, in order.
impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    async fn notify(&self, notification: &Notification) {
        self.0.notify(notification).await;
        self.1.notify(notification).await;
    }
}
