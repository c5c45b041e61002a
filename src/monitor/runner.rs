//! The recurring address monitor and its query handle.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::wrappers::WatchStream;

use super::pipeline::{CycleOutcome, Pipeline};
use super::{CycleError, MonitorState, Snapshot};
use crate::display::IconSink;
use crate::lookup::{AddressResolver, GeoResolver};
use crate::notify::Notifier;

/// Default time between check cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Owns [`MonitorState`] and drives the check cycle on a fixed interval.
///
/// Cycles run inline in the monitor loop, so a slow cycle delays the next
/// one instead of overlapping it; ticks missed meanwhile are skipped.
///
/// # Example
///
/// ```ignore
/// let (monitor, handle) = AddressMonitor::new(pipeline, DEFAULT_INTERVAL);
/// tokio::spawn(monitor.run(shutdown_signal()));
///
/// let snapshot = handle.query();
/// ```
#[derive(Debug)]
pub struct AddressMonitor<A, G, N, I> {
    pipeline: Pipeline<A, G, N, I>,
    interval: Duration,
    state: MonitorState,
    publisher: watch::Sender<Snapshot>,
}

/// Cheap, cloneable read access to the monitor's latest snapshot.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    receiver: watch::Receiver<Snapshot>,
}

impl MonitorHandle {
    /// Returns the current snapshot. Never blocks and never touches the network.
    #[must_use]
    pub fn query(&self) -> Snapshot {
        self.receiver.borrow().clone()
    }

    /// Returns a stream yielding the current snapshot, then every change.
    #[must_use]
    pub fn subscribe(&self) -> WatchStream<Snapshot> {
        WatchStream::new(self.receiver.clone())
    }
}

impl<A, G, N, I> AddressMonitor<A, G, N, I> {
    /// Creates a monitor with empty state and its query handle.
    #[must_use]
    pub fn new(pipeline: Pipeline<A, G, N, I>, interval: Duration) -> (Self, MonitorHandle) {
        let state = MonitorState::new();
        let (publisher, receiver) = watch::channel(state.snapshot());

        let monitor = Self {
            pipeline,
            interval,
            state,
            publisher,
        };

        (monitor, MonitorHandle { receiver })
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Publishes the current state to handles if it differs from the last one.
    fn publish(&self) {
        let snapshot = self.state.snapshot();
        self.publisher.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

impl<A, G, N, I> AddressMonitor<A, G, N, I>
where
    A: AddressResolver,
    G: GeoResolver,
    N: Notifier + 'static,
    I: IconSink,
{
    /// Runs a single cycle and publishes the resulting state.
    ///
    /// State committed before a failure is published too.
    ///
    /// # Errors
    ///
    /// Returns the cycle's [`CycleError`] after publishing.
    pub async fn check_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let result = self.pipeline.run_cycle(&mut self.state).await;
        self.publish();
        result
    }

    /// Shows the icon for the current state without running a cycle.
    pub fn reset_display(&self) {
        self.pipeline.show_icon_for(&self.state);
    }

    /// Runs cycles until `shutdown` resolves.
    ///
    /// The first cycle starts immediately. Cycle failures are logged and the
    /// loop continues. A cycle still in flight at shutdown is abandoned.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::debug!("Monitor stopping");
                    return;
                }

                () = self.tick(&mut ticker) => {}
            }
        }
    }

    async fn tick(&mut self, ticker: &mut Interval) {
        ticker.tick().await;

        match self.check_once().await {
            Ok(CycleOutcome::Unchanged) => {}
            Ok(CycleOutcome::Resolved { notified, .. }) => {
                if notified {
                    tracing::debug!("Change notification dispatched");
                }
            }
            Err(e @ CycleError::AddressLookupFailed(_)) => {
                tracing::warn!("{e}");
            }
            Err(e @ CycleError::GeoLookupFailed { .. }) => {
                tracing::error!("{e}");
            }
        }
    }
}
