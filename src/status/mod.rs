//! Status file persistence for out-of-process queries.
//!
//! The running monitor writes its latest snapshot here so that
//! `ipflag status` can answer without touching the network.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileStatusStore;

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::{Icon, IconRef, IconTheme};
use crate::monitor::Snapshot;

/// What the status file records: the snapshot plus the icon on display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Latest published snapshot
    pub snapshot: Snapshot,
    /// Icon resolved for the snapshot's country code
    pub icon: IconRef,
}

impl StatusReport {
    /// Builds a report, resolving the icon through `theme`.
    #[must_use]
    pub fn new(snapshot: Snapshot, theme: &IconTheme) -> Self {
        let icon = theme.resolve(&Icon::for_country(&snapshot.country_code));
        Self { snapshot, icon }
    }

    /// Human-readable summary, one field per line.
    #[must_use]
    pub fn describe(&self) -> String {
        let Some(address) = self.snapshot.address.as_deref() else {
            return "Not detected yet".to_string();
        };

        let or_unknown = |s: &str| {
            if s.is_empty() {
                "Unknown".to_string()
            } else {
                s.to_string()
            }
        };

        format!(
            "Address: {address}\nCountry: {}\nCode:    {}",
            or_unknown(&self.snapshot.country_name),
            or_unknown(&self.snapshot.country_code.to_uppercase()),
        )
    }
}

/// Result of loading the status file.
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// A report was read successfully.
    Loaded(StatusReport),

    /// No status file exists (monitor never ran or never published).
    NotFound,

    /// The file exists but could not be used.
    Corrupted {
        /// Reason for logging.
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded report, if any.
    #[must_use]
    pub fn into_report(self) -> Option<StatusReport> {
        match self {
            Self::Loaded(report) => Some(report),
            Self::NotFound | Self::Corrupted { .. } => None,
        }
    }

    /// Returns `true` if a report was loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Errors from writing the status file.
///
/// Read-side problems are [`LoadResult`] variants instead.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Failed to write the status file.
    #[error("Failed to write status file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize the report to JSON.
    #[error("Failed to serialize status: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Persists the monitor's latest report.
///
/// Implementations write atomically and treat a missing file as
/// [`LoadResult::NotFound`].
pub trait StatusStore: Send + Sync {
    /// Loads the last saved report.
    fn load(&self) -> LoadResult;

    /// Saves `report`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn save(
        &self,
        report: &StatusReport,
    ) -> impl std::future::Future<Output = Result<(), StatusError>> + Send;
}
