//! HTTP webhook notification sink.

use std::time::{Duration, SystemTime};

use handlebars::Handlebars;
use serde::Serialize;

use super::{Notification, Notifier, NotifyError};
use crate::transport::{HttpClient, HttpError, HttpRequest};

/// Default limit for one delivery attempt.
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts notifications to an HTTP endpoint.
///
/// # Body
///
/// Without a template the body is a JSON object. With a template the body is
/// the rendered Handlebars output. Either way the available fields are:
/// `title`, `message`, `address`, `previous_address`, `country`,
/// `country_code`, and `timestamp` (Unix seconds).
///
/// Each notification is attempted once and bounded by a timeout
/// ([`DEFAULT_WEBHOOK_TIMEOUT`] unless set). A failure is logged and dropped.
#[derive(Debug)]
pub struct WebhookNotifier<H> {
    client: H,
    url: url::Url,
    method: http::Method,
    headers: http::HeaderMap,
    body_template: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct BodyData<'a> {
    #[serde(flatten)]
    notification: &'a Notification,
    timestamp: u64,
}

impl<H> WebhookNotifier<H> {
    /// Creates a notifier that POSTs the default JSON body to `url`.
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            url,
            method: http::Method::POST,
            headers: http::HeaderMap::new(),
            body_template: None,
            timeout: DEFAULT_WEBHOOK_TIMEOUT,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a Handlebars body template.
    #[must_use]
    pub fn with_body_template(mut self, template: impl Into<String>) -> Self {
        self.body_template = Some(template.into());
        self
    }

    /// Sets the limit for one delivery attempt.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the delivery timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    fn render_body(&self, notification: &Notification) -> Result<Vec<u8>, NotifyError> {
        let data = BodyData {
            notification,
            timestamp: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map_or(0, |d| d.as_secs()),
        };

        match &self.body_template {
            Some(template) => Handlebars::new()
                .render_template(template, &data)
                .map(String::into_bytes)
                .map_err(|e| NotifyError::Template(e.to_string())),
            None => Ok(serde_json::to_vec(&data)?),
        }
    }

    fn build_request(&self, notification: &Notification) -> Result<HttpRequest, NotifyError> {
        let mut request = HttpRequest::new(self.method.clone(), self.url.clone())
            .with_body(self.render_body(notification)?);

        for (name, value) in &self.headers {
            request.headers.append(name, value.clone());
        }

        if self.body_template.is_none() && !request.headers.contains_key(http::header::CONTENT_TYPE)
        {
            request.headers.insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
        }

        Ok(request)
    }
}

impl<H: HttpClient> WebhookNotifier<H> {
    /// Delivers `notification` once and reports the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the body cannot be built, no response is
    /// obtained within the timeout, or the endpoint answers with a non-2xx
    /// status.
    pub async fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let request = self.build_request(notification)?;
        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| HttpError::Timeout)??;

        if response.is_success() {
            return Ok(());
        }

        Err(NotifyError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }
}

impl<H: HttpClient> Notifier for WebhookNotifier<H> {
    async fn notify(&self, notification: &Notification) {
        match self.deliver(notification).await {
            Ok(()) => tracing::debug!("Webhook notification sent to {}", self.url),
            Err(e) => tracing::error!("Webhook notification failed: {e}"),
        }
    }
}
