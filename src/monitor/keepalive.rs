//! Periodic no-op heartbeat for hosts that suspend idle processes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Default time between heartbeats.
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(20);

/// A running heartbeat task. Aborted on drop.
#[derive(Debug)]
pub struct KeepAlive {
    beats: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl KeepAlive {
    /// Returns how many heartbeats have fired.
    #[must_use]
    pub fn beats(&self) -> u64 {
        self.beats.load(Ordering::Relaxed)
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a heartbeat firing every `period`, starting one period from now.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn spawn(period: Duration) -> KeepAlive {
    let beats = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&beats);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::trace!(beats = n, "keep-alive");
        }
    });

    KeepAlive { beats, task }
}
