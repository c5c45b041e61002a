//! The per-cycle check: address lookup, comparison, geolocation, side effects.

use std::sync::Arc;

use super::{CycleError, MonitorState};
use crate::display::{Icon, IconSink, IconTheme};
use crate::lookup::{AddressResolver, GeoResolver};
use crate::notify::{Notification, Notifier};

/// What a completed cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Same address as before with geo already known. Nothing happened.
    Unchanged,
    /// Geolocation was resolved and committed for the current address.
    Resolved {
        /// Address before this cycle, if any
        previous: Option<String>,
        /// Whether a change notification was dispatched
        notified: bool,
    },
}

/// One check cycle, end to end.
///
/// # Type Parameters
///
/// * `A` - [`AddressResolver`] for the public address
/// * `G` - [`GeoResolver`] for the country
/// * `N` - [`Notifier`] receiving change alerts
/// * `I` - [`IconSink`] receiving the icon to show
///
/// Notifications are delivered on a detached task, so a slow sink never
/// holds up the cycle that triggered it.
#[derive(Debug)]
pub struct Pipeline<A, G, N, I> {
    address: A,
    geo: G,
    notifier: Arc<N>,
    icons: I,
    theme: IconTheme,
}

impl<A, G, N, I> Pipeline<A, G, N, I> {
    /// Creates a pipeline with the default icon theme.
    #[must_use]
    pub fn new(address: A, geo: G, notifier: N, icons: I) -> Self {
        Self {
            address,
            geo,
            notifier: Arc::new(notifier),
            icons,
            theme: IconTheme::default(),
        }
    }

    /// Sets the icon theme.
    #[must_use]
    pub fn with_theme(mut self, theme: IconTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns the icon theme.
    #[must_use]
    pub const fn theme(&self) -> &IconTheme {
        &self.theme
    }
}

impl<A, G, N, I> Pipeline<A, G, N, I>
where
    A: AddressResolver,
    G: GeoResolver,
    N: Notifier + 'static,
    I: IconSink,
{
    /// Runs one cycle against `state`.
    ///
    /// The new address is recorded before geolocation starts, so a geo
    /// failure leaves the address updated with geo marked unknown. The next
    /// cycle for the same address then retries geolocation.
    ///
    /// State and icon are updated before a change notification is handed
    /// off; `notified` in the outcome means one was dispatched. Must be
    /// called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::AddressLookupFailed`] with `state` untouched, or
    /// [`CycleError::GeoLookupFailed`] after the address was recorded.
    pub async fn run_cycle(&self, state: &mut MonitorState) -> Result<CycleOutcome, CycleError> {
        let address = self
            .address
            .resolve()
            .await
            .map_err(CycleError::AddressLookupFailed)?;

        if state.is_steady(&address) {
            tracing::trace!("Address {address} unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        let previous = state.begin_address(address.clone());
        tracing::debug!(
            "Address observed: {address} (previous: {})",
            previous.as_deref().unwrap_or("none")
        );

        let geo = self
            .geo
            .resolve(&address)
            .await
            .map_err(|source| CycleError::GeoLookupFailed {
                address: address.clone(),
                source,
            })?;

        state.commit_geo(&geo);
        self.icons
            .set_icon(&self.theme.resolve(&Icon::for_country(state.country_code())));

        let notified = match previous.as_deref() {
            Some(prev) if !prev.is_empty() && prev != address => {
                self.dispatch(Notification::address_changed(prev, &address, &geo));
                true
            }
            _ => false,
        };

        tracing::info!(
            "Address {address} located in {} ({})",
            display_or_unknown(&geo.country),
            display_or_unknown(&geo.country_code),
        );

        Ok(CycleOutcome::Resolved { previous, notified })
    }

    fn dispatch(&self, notification: Notification) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            notifier.notify(&notification).await;
        });
    }

    /// Shows the icon matching `state`. Used to reset the display at startup.
    pub fn show_icon_for(&self, state: &MonitorState) {
        self.icons
            .set_icon(&self.theme.resolve(&Icon::for_country(state.country_code())));
    }
}

fn display_or_unknown(s: &str) -> &str {
    if s.is_empty() { "unknown" } else { s }
}
