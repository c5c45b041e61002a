//! Error types for the monitor layer.

use thiserror::Error;

use crate::lookup::LookupFailure;

/// Why a check cycle stopped early.
///
/// Both kinds are recovered by the next scheduled cycle; neither is shown to
/// the user.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The public address could not be determined. State was not touched.
    #[error("Address lookup failed: {0}")]
    AddressLookupFailed(#[source] LookupFailure),

    /// Geolocation failed after the new address was recorded.
    #[error("Geo lookup failed for {address}: {source}")]
    GeoLookupFailed {
        /// Address whose geolocation was requested
        address: String,
        /// Underlying failure
        #[source]
        source: LookupFailure,
    },
}
