//! Public address resolution.

use serde::Deserialize;

use super::LookupFailure;
use super::error::ensure_success;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// Default address service endpoint.
pub const DEFAULT_ADDRESS_URL: &str = "https://api.ipify.org?format=json";

/// Resolves the externally observed public address of this host.
pub trait AddressResolver: Send + Sync {
    /// Performs one lookup.
    ///
    /// # Errors
    ///
    /// Returns [`LookupFailure`] on transport errors, non-2xx responses, or a
    /// payload without a usable address.
    fn resolve(&self) -> impl std::future::Future<Output = Result<String, LookupFailure>> + Send;
}

#[derive(Debug, Deserialize)]
struct AddressPayload {
    #[serde(default)]
    ip: Option<serde_json::Value>,
}

/// Address resolver backed by an HTTP JSON service answering `{"ip": "..."}`.
#[derive(Debug, Clone)]
pub struct HttpAddressResolver<H> {
    client: H,
    url: url::Url,
}

impl<H> HttpAddressResolver<H> {
    /// Creates a resolver querying `url`.
    #[must_use]
    pub const fn new(client: H, url: url::Url) -> Self {
        Self { client, url }
    }

    /// Returns the service URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }
}

impl<H: HttpClient> AddressResolver for HttpAddressResolver<H> {
    async fn resolve(&self) -> Result<String, LookupFailure> {
        let response = self.client.request(HttpRequest::get(self.url.clone())).await?;
        let response = ensure_success(response)?;

        parse_address(&response)
    }
}

/// Extracts the address from a response body.
///
/// A `null` body, a missing `ip` field, a non-string value, or an empty
/// string are all malformed. Any other string is returned as the service
/// sent it.
pub(super) fn parse_address(response: &HttpResponse) -> Result<String, LookupFailure> {
    let payload: Option<AddressPayload> = response
        .json()
        .map_err(|e| LookupFailure::Malformed(format!("invalid JSON: {e}")))?;

    let ip = payload
        .and_then(|p| p.ip)
        .ok_or_else(|| LookupFailure::Malformed("address not found in response".to_string()))?;

    match ip {
        serde_json::Value::String(s) if !s.is_empty() => Ok(s),
        other => Err(LookupFailure::Malformed(format!(
            "unusable address value: {other}"
        ))),
    }
}
