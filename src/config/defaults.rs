//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default address lookup endpoint.
pub const ADDRESS_URL: &str = crate::lookup::DEFAULT_ADDRESS_URL;

/// Default geolocation endpoint. The address is appended as a path segment.
pub const GEO_URL: &str = crate::lookup::DEFAULT_GEO_URL;

/// Default check interval in seconds.
pub const INTERVAL_SECS: u64 = 10;

/// Default keepalive heartbeat interval in seconds.
pub const KEEPALIVE_INTERVAL_SECS: u64 = 20;

/// Default directory holding `<code>.png` flag images.
pub const FLAGS_DIR: &str = "flags";

/// Default icon shown when no country is known.
pub const DEFAULT_ICON: &str = "icon.png";

/// Default HTTP method for notification webhooks.
pub const METHOD: &str = "POST";

/// Default check interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}

/// Default keepalive interval as Duration.
#[must_use]
pub const fn keepalive_interval() -> Duration {
    Duration::from_secs(KEEPALIVE_INTERVAL_SECS)
}
