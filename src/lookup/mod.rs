//! Lookup services for the public address and its geolocation.
//!
//! This module provides:
//! - Public address resolution ([`AddressResolver`], [`HttpAddressResolver`])
//! - Geolocation resolution ([`GeoResolver`], [`HttpGeoResolver`], [`GeoInfo`])
//! - Failure classification shared by both ([`LookupFailure`])
//!
//! Neither resolver retries. A failed lookup is reported once and the
//! next monitor tick is the retry.

mod address;
mod error;
mod geo;


pub use address::{AddressResolver, DEFAULT_ADDRESS_URL, HttpAddressResolver};
pub use error::LookupFailure;
pub use geo::{DEFAULT_GEO_URL, GeoInfo, GeoResolver, HttpGeoResolver};
