//! Application execution logic.
//!
//! This module wires the lookups, notifiers and icon sink into the address
//! monitor, runs it until a shutdown signal arrives, and keeps the status
//! file current.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::signal;
use tokio_stream::{Stream, StreamExt};

use ipflag::config::{NotifyConfig, ValidatedConfig};
use ipflag::display::{IconTheme, LogIconSink};
use ipflag::lookup::{HttpAddressResolver, HttpGeoResolver};
use ipflag::monitor::{AddressMonitor, Pipeline, Snapshot, keepalive};
use ipflag::notify::{DEFAULT_WEBHOOK_TIMEOUT, LogNotifier, WebhookNotifier};
use ipflag::status::{FileStatusStore, LoadResult, StatusReport, StatusStore};
use ipflag::transport::ReqwestClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to install the shutdown signal handler.
    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    /// The status file writer task panicked or was cancelled.
    #[error("Status writer stopped unexpectedly: {0}")]
    StatusWriter(#[source] tokio::task::JoinError),
}

/// Executes the main application loop.
///
/// This function:
/// 1. Builds the HTTP client, resolvers and notification sinks
/// 2. Resets the display to the default icon
/// 3. Starts the keep-alive heartbeat and, if configured, the status writer
/// 4. Runs the monitor until shutdown signal (Ctrl+C / SIGTERM)
///
/// # Errors
///
/// Returns an error if the signal handler cannot be installed or the
/// status writer dies.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let shutdown = shutdown_signal()?;

    let client = create_client(&config);
    let webhook = create_webhook(client.clone(), config.notify.as_ref(), config.timeout);

    let pipeline = Pipeline::new(
        HttpAddressResolver::new(client.clone(), config.address_url.clone()),
        HttpGeoResolver::new(client, config.geo_url.clone()),
        (LogNotifier, webhook),
        LogIconSink,
    )
    .with_theme(config.icon_theme.clone());

    let (monitor, handle) = AddressMonitor::new(pipeline, config.interval);
    monitor.reset_display();

    let _keepalive = keepalive::spawn(config.keepalive_interval);

    let writer = config.status_file.as_ref().map(|path| {
        let store = FileStatusStore::new(path);
        tracing::info!("Status file: {}", store.path().display());
        tokio::spawn(write_status(
            store,
            handle.subscribe(),
            config.icon_theme.clone(),
        ))
    });

    tracing::info!(
        "Monitoring public address every {}s",
        config.interval.as_secs()
    );

    monitor.run(shutdown).await;
    tracing::info!("Shutdown signal received, stopping...");

    // The monitor is gone, so the writer drains the last snapshot and ends.
    if let Some(writer) = writer {
        writer.await.map_err(RunError::StatusWriter)?;
    }

    tracing::debug!("Last known state: {:?}", handle.query());
    Ok(())
}

/// Builds the shared HTTP client, applying the configured timeout.
fn create_client(config: &ValidatedConfig) -> ReqwestClient {
    config
        .timeout
        .map_or_else(ReqwestClient::new, ReqwestClient::with_timeout)
}

/// Creates the webhook notifier if a webhook is configured.
///
/// Delivery is bounded by `timeout` when set, otherwise by
/// [`DEFAULT_WEBHOOK_TIMEOUT`].
fn create_webhook(
    client: ReqwestClient,
    notify: Option<&NotifyConfig>,
    timeout: Option<Duration>,
) -> Option<WebhookNotifier<ReqwestClient>> {
    let notify = notify?;

    let mut webhook = WebhookNotifier::new(client, notify.url.clone())
        .with_method(notify.method.clone())
        .with_headers(notify.headers.clone())
        .with_timeout(timeout.unwrap_or(DEFAULT_WEBHOOK_TIMEOUT));

    if let Some(ref template) = notify.body_template {
        webhook = webhook.with_body_template(template);
    }

    tracing::info!(
        "Webhook notifications enabled: {} {}",
        notify.method,
        notify.url
    );
    Some(webhook)
}

/// Saves a report for every snapshot the stream yields.
///
/// Save failures are logged and the next snapshot is tried again.
async fn write_status<S, U>(store: S, mut updates: U, theme: IconTheme)
where
    S: StatusStore,
    U: Stream<Item = Snapshot> + Unpin,
{
    while let Some(snapshot) = updates.next().await {
        let report = StatusReport::new(snapshot, &theme);
        if let Err(e) = store.save(&report).await {
            tracing::error!("Failed to save status: {e}");
        }
    }
}

/// Text printed by the `status` subcommand.
///
/// Returns the text and whether the status could be read.
pub fn render_status(result: LoadResult) -> (String, bool) {
    match result {
        LoadResult::Loaded(report) => (report.describe(), true),
        LoadResult::NotFound => ("Not detected yet".to_string(), true),
        LoadResult::Corrupted { reason } => {
            tracing::debug!("Status file unreadable: {reason}");
            ("Unavailable".to_string(), false)
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// The handlers are installed before returning so a failure surfaces as an
/// error instead of a silent hang.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
fn shutdown_signal() -> Result<impl Future<Output = ()>, RunError> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(RunError::Signal)?;

    Ok(async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            terminate.recv().await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {}
            () = terminate => {}
        }
    })
}
