//! Tests for `WebhookNotifier`.

use std::sync::Arc;

use std::time::Duration;

use super::{DEFAULT_WEBHOOK_TIMEOUT, Notification, Notifier, NotifyError, WebhookNotifier};
use crate::lookup::GeoInfo;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::transport::mock::MockClient;

fn hook_url() -> url::Url {
    url::Url::parse("https://hooks.example.com/ip").unwrap()
}

fn sample() -> Notification {
    Notification::address_changed("1.2.3.4", "5.6.7.8", &GeoInfo::new("Germany", "DE"))
}

mod builder {
    use super::*;

    #[test]
    fn new_defaults_to_post() {
        let notifier = WebhookNotifier::new(MockClient::default(), hook_url());

        assert_eq!(*notifier.method(), http::Method::POST);
        assert_eq!(notifier.url(), &hook_url());
    }

    #[test]
    fn with_method_overrides() {
        let notifier =
            WebhookNotifier::new(MockClient::default(), hook_url()).with_method(http::Method::PUT);

        assert_eq!(*notifier.method(), http::Method::PUT);
    }

    #[test]
    fn timeout_defaults_and_overrides() {
        let notifier = WebhookNotifier::new(MockClient::default(), hook_url());
        assert_eq!(notifier.timeout(), DEFAULT_WEBHOOK_TIMEOUT);

        let notifier = notifier.with_timeout(Duration::from_secs(2));
        assert_eq!(notifier.timeout(), Duration::from_secs(2));
    }
}

mod delivery {
    use super::*;

    #[tokio::test]
    async fn default_body_is_json_with_content_type() {
        let client = Arc::new(MockClient::ok(""));
        let notifier = WebhookNotifier::new(client.clone(), hook_url());

        notifier.deliver(&sample()).await.unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: serde_json::Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["address"], "5.6.7.8");
        assert_eq!(body["previous_address"], "1.2.3.4");
        assert_eq!(body["country"], "Germany");
        assert_eq!(body["country_code"], "de");
        assert_eq!(body["message"], "Your IP has changed to 5.6.7.8 (Germany)");
        assert!(body["timestamp"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn template_renders_fields() {
        let client = Arc::new(MockClient::ok(""));
        let notifier = WebhookNotifier::new(client.clone(), hook_url())
            .with_body_template("{{address}} {{country_code}} from {{previous_address}}");

        notifier.deliver(&sample()).await.unwrap();

        let req = &client.captured_requests()[0];
        assert_eq!(
            req.body.as_deref(),
            Some(b"5.6.7.8 de from 1.2.3.4".as_slice())
        );
        assert!(req.headers.get(http::header::CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn configured_headers_are_sent() {
        let client = Arc::new(MockClient::ok(""));
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            http::HeaderValue::from_static("Bearer t0ken"),
        );
        let notifier = WebhookNotifier::new(client.clone(), hook_url()).with_headers(headers);

        notifier.deliver(&sample()).await.unwrap();

        let req = &client.captured_requests()[0];
        assert_eq!(
            req.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer t0ken"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let client = MockClient::status(http::StatusCode::INTERNAL_SERVER_ERROR);
        let notifier = WebhookNotifier::new(client, hook_url());

        let err = notifier.deliver(&sample()).await.unwrap_err();

        assert!(matches!(
            err,
            NotifyError::NonSuccessStatus {
                status: http::StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn transport_error_is_reported() {
        let client = MockClient::new(vec![Err(HttpError::Timeout)]);
        let notifier = WebhookNotifier::new(client, hook_url());

        let err = notifier.deliver(&sample()).await.unwrap_err();

        assert!(matches!(err, NotifyError::Http(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn broken_template_is_reported_without_request() {
        let client = Arc::new(MockClient::ok(""));
        let notifier =
            WebhookNotifier::new(client.clone(), hook_url()).with_body_template("{{#if}}");

        let err = notifier.deliver(&sample()).await.unwrap_err();

        assert!(matches!(err, NotifyError::Template(_)));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn notify_attempts_once_and_swallows_failure() {
        let client = Arc::new(MockClient::new(vec![
            Err(HttpError::Timeout),
            Err(HttpError::Timeout),
        ]));
        let notifier = WebhookNotifier::new(client.clone(), hook_url());

        notifier.notify(&sample()).await;

        assert_eq!(client.calls(), 1);
    }

    /// Endpoint that accepts the connection and never answers.
    struct StalledClient;

    impl HttpClient for StalledClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_endpoint_times_out() {
        let notifier =
            WebhookNotifier::new(StalledClient, hook_url()).with_timeout(Duration::from_secs(5));

        let err = notifier.deliver(&sample()).await.unwrap_err();

        assert!(matches!(err, NotifyError::Http(HttpError::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_returns_after_timeout_on_stalled_endpoint() {
        let notifier = WebhookNotifier::new(StalledClient, hook_url());
        let started = tokio::time::Instant::now();

        notifier.notify(&sample()).await;

        assert_eq!(started.elapsed(), DEFAULT_WEBHOOK_TIMEOUT);
    }
}
