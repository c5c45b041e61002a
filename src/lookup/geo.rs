//! Geolocation of a public address.

use serde::{Deserialize, Serialize};

use super::LookupFailure;
use super::error::ensure_success;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// Default geolocation service base URL. The address is appended as a path segment.
pub const DEFAULT_GEO_URL: &str = "https://ipwho.is/";

/// Country information for an address.
///
/// Absent upstream fields are empty strings. `country_code` is always
/// lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoInfo {
    /// Human-readable country name
    pub country: String,
    /// ISO 3166-1 alpha-2 code, lowercase
    pub country_code: String,
}

impl GeoInfo {
    /// Creates geo info, lowercasing the country code.
    #[must_use]
    pub fn new(country: impl Into<String>, country_code: &str) -> Self {
        Self {
            country: country.into(),
            country_code: country_code.to_lowercase(),
        }
    }

    /// Returns true if neither field is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country.is_empty() && self.country_code.is_empty()
    }
}

/// Resolves geolocation for a given address.
pub trait GeoResolver: Send + Sync {
    /// Performs one lookup for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupFailure`] on transport errors, non-2xx responses, or a
    /// body that is not JSON. Missing fields are not errors.
    fn resolve(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<GeoInfo, LookupFailure>> + Send;
}

#[derive(Debug, Default, Deserialize)]
struct GeoPayload {
    #[serde(default)]
    country: Option<serde_json::Value>,
    #[serde(default)]
    country_code: Option<serde_json::Value>,
}

/// Geolocation resolver backed by an HTTP JSON service keyed by address.
#[derive(Debug, Clone)]
pub struct HttpGeoResolver<H> {
    client: H,
    base_url: url::Url,
}

impl<H> HttpGeoResolver<H> {
    /// Creates a resolver whose request URL is `base_url` plus the address.
    #[must_use]
    pub const fn new(client: H, base_url: url::Url) -> Self {
        Self { client, base_url }
    }

    /// Builds the request URL for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupFailure::Malformed`] if the base URL cannot carry path
    /// segments. Validated configuration never produces such a URL.
    pub fn url_for(&self, address: &str) -> Result<url::Url, LookupFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                LookupFailure::Malformed(format!("cannot append address to {}", self.base_url))
            })?
            .pop_if_empty()
            .push(address);
        Ok(url)
    }
}

impl<H: HttpClient> GeoResolver for HttpGeoResolver<H> {
    async fn resolve(&self, address: &str) -> Result<GeoInfo, LookupFailure> {
        let url = self.url_for(address)?;
        let response = self.client.request(HttpRequest::get(url)).await?;
        let response = ensure_success(response)?;

        parse_geo(&response)
    }
}

/// Extracts country fields from a response body.
///
/// `null` or non-string fields degrade to empty strings.
pub(super) fn parse_geo(response: &HttpResponse) -> Result<GeoInfo, LookupFailure> {
    let payload: Option<GeoPayload> = response
        .json()
        .map_err(|e| LookupFailure::Malformed(format!("invalid JSON: {e}")))?;
    let payload = payload.unwrap_or_default();

    Ok(GeoInfo::new(
        string_field(payload.country),
        &string_field(payload.country_code),
    ))
}

fn string_field(value: Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}
