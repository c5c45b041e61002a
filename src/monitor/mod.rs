//! Monitor layer for detecting public address changes.
//!
//! This module provides:
//! - Process state and its query view ([`MonitorState`], [`Snapshot`])
//! - The per-cycle check ([`Pipeline`], [`CycleOutcome`], [`CycleError`])
//! - The recurring monitor and its handle ([`AddressMonitor`], [`MonitorHandle`])
//! - A heartbeat for hosts that suspend idle processes ([`keepalive`])

mod error;
pub mod keepalive;
mod pipeline;
mod runner;
mod state;

#[cfg(test)]
mod test_fixtures;

pub use error::CycleError;
pub use pipeline::{CycleOutcome, Pipeline};
pub use runner::{AddressMonitor, DEFAULT_INTERVAL, MonitorHandle};
pub use state::{MonitorState, Snapshot};
