//! Monitor state and the snapshot served to queries.

use serde::{Deserialize, Serialize};

use crate::lookup::GeoInfo;

/// The last observed address and what is known about it.
///
/// Country fields and the geo flag are only written together through
/// [`commit_geo`](Self::commit_geo); the address and the flag reset only
/// through [`begin_address`](Self::begin_address).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    current_address: Option<String>,
    country_name: String,
    country_code: String,
    has_geo: bool,
}

impl MonitorState {
    /// Creates the empty startup state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last observed address.
    #[must_use]
    pub fn current_address(&self) -> Option<&str> {
        self.current_address.as_deref()
    }

    /// Returns the country name, empty if unknown.
    #[must_use]
    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    /// Returns the lowercase country code, empty if unknown.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Returns true once geolocation succeeded for the current address.
    #[must_use]
    pub const fn has_geo(&self) -> bool {
        self.has_geo
    }

    /// Returns true if `address` is the current address and its geo is known.
    #[must_use]
    pub fn is_steady(&self, address: &str) -> bool {
        self.has_geo && self.current_address.as_deref() == Some(address)
    }

    /// Records a newly observed address and marks geo as unknown.
    ///
    /// Returns the previous address. Country fields keep their old values
    /// until the next [`commit_geo`](Self::commit_geo).
    pub fn begin_address(&mut self, address: impl Into<String>) -> Option<String> {
        self.has_geo = false;
        self.current_address.replace(address.into())
    }

    /// Records the geolocation of the current address.
    pub fn commit_geo(&mut self, geo: &GeoInfo) {
        self.country_name.clone_from(&geo.country);
        self.country_code = geo.country_code.to_lowercase();
        self.has_geo = true;
    }

    /// Returns the query view of this state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            address: self.current_address.clone(),
            country_name: self.country_name.clone(),
            country_code: self.country_code.clone(),
        }
    }
}

/// Point-in-time answer to a state query.
///
/// Before the first successful lookup `address` is `None` and both country
/// fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Last observed public address
    pub address: Option<String>,
    /// Country name for `address`
    #[serde(rename = "country")]
    pub country_name: String,
    /// Lowercase country code for `address`
    pub country_code: String,
}

impl Snapshot {
    /// Returns true if no address has been observed yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none()
    }
}
