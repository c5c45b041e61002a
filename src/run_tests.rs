//! Tests for the run module.

use super::*;

use ipflag::config::Cli;

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["ipflag"];
    full_args.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn signal_displays_source() {
        let error = RunError::Signal(std::io::Error::other("no signals here"));

        assert!(error.to_string().contains("Failed to install signal handler"));
        assert!(error.to_string().contains("no signals here"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::Signal(std::io::Error::other("x"));
        assert!(format!("{error:?}").contains("Signal"));
    }
}

mod create_webhook {
    use super::*;

    #[test]
    fn none_without_notify_url() {
        let config = config(&[]);

        assert!(create_webhook(ReqwestClient::new(), config.notify.as_ref(), config.timeout).is_none());
    }

    #[test]
    fn uses_configured_url_and_method() {
        let config = config(&[
            "--notify-url",
            "https://hooks.example.com/ip",
            "--notify-method",
            "PUT",
        ]);

        let webhook = create_webhook(ReqwestClient::new(), config.notify.as_ref(), config.timeout).unwrap();

        assert_eq!(webhook.url().as_str(), "https://hooks.example.com/ip");
        assert_eq!(webhook.method(), http::Method::PUT);
    }

    #[test]
    fn delivery_timeout_follows_lookup_timeout() {
        let config = config(&[
            "--notify-url",
            "https://hooks.example.com/ip",
            "--timeout",
            "3",
        ]);

        let webhook =
            create_webhook(ReqwestClient::new(), config.notify.as_ref(), config.timeout).unwrap();

        assert_eq!(webhook.timeout(), std::time::Duration::from_secs(3));
    }

    #[test]
    fn delivery_timeout_defaults_without_lookup_timeout() {
        let config = config(&["--notify-url", "https://hooks.example.com/ip"]);

        let webhook =
            create_webhook(ReqwestClient::new(), config.notify.as_ref(), config.timeout).unwrap();

        assert_eq!(webhook.timeout(), DEFAULT_WEBHOOK_TIMEOUT);
    }

    #[test]
    fn defaults_to_post() {
        let config = config(&["--notify-url", "https://hooks.example.com/ip"]);

        let webhook = create_webhook(ReqwestClient::new(), config.notify.as_ref(), config.timeout).unwrap();

        assert_eq!(webhook.method(), http::Method::POST);
    }
}

mod render_status {
    use super::*;
    use ipflag::display::IconTheme;

    fn located(address: &str, country: &str, code: &str) -> StatusReport {
        StatusReport::new(
            Snapshot {
                address: Some(address.to_string()),
                country_name: country.to_string(),
                country_code: code.to_string(),
            },
            &IconTheme::default(),
        )
    }

    #[test]
    fn loaded_report_is_described() {
        let (text, ok) = render_status(LoadResult::Loaded(located("1.2.3.4", "Germany", "de")));

        assert!(ok);
        assert!(text.contains("1.2.3.4"));
        assert!(text.contains("Germany"));
    }

    #[test]
    fn missing_file_is_not_detected_yet() {
        let (text, ok) = render_status(LoadResult::NotFound);

        assert!(ok);
        assert_eq!(text, "Not detected yet");
    }

    #[test]
    fn empty_snapshot_is_not_detected_yet() {
        let report = StatusReport::new(Snapshot::default(), &IconTheme::default());

        let (text, _) = render_status(LoadResult::Loaded(report));

        assert_eq!(text, "Not detected yet");
    }

    #[test]
    fn corrupted_file_is_unavailable() {
        let (text, ok) = render_status(LoadResult::Corrupted {
            reason: "Invalid JSON".to_string(),
        });

        assert!(!ok);
        assert_eq!(text, "Unavailable");
    }
}

mod write_status {
    use super::*;
    use ipflag::display::{IconRef, IconTheme};
    use ipflag::status::StatusError;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Store recording every saved report.
    #[derive(Default, Clone)]
    struct RecordingStore {
        saved: Arc<Mutex<Vec<StatusReport>>>,
        fail: bool,
    }

    impl StatusStore for RecordingStore {
        fn load(&self) -> LoadResult {
            LoadResult::NotFound
        }

        async fn save(&self, report: &StatusReport) -> Result<(), StatusError> {
            if self.fail {
                return Err(StatusError::Write(std::io::Error::other("disk full")));
            }
            self.saved.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    fn snapshot(address: &str, code: &str) -> Snapshot {
        Snapshot {
            address: Some(address.to_string()),
            country_name: String::new(),
            country_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn saves_one_report_per_snapshot() {
        let store = RecordingStore::default();
        let updates = tokio_stream::iter(vec![snapshot("1.2.3.4", "de"), snapshot("5.6.7.8", "")]);

        write_status(store.clone(), updates, IconTheme::default()).await;

        let saved = store.saved.lock().unwrap().clone();
        assert_eq!(saved.len(), 2);
        assert_eq!(
            saved[0].icon.path_for(16),
            Some(&PathBuf::from("flags/de.png"))
        );
        assert_eq!(saved[1].icon, IconRef::Default(PathBuf::from("icon.png")));
    }

    #[tokio::test]
    async fn keeps_going_after_save_failure() {
        let store = RecordingStore {
            fail: true,
            ..RecordingStore::default()
        };
        let updates = tokio_stream::iter(vec![snapshot("1.2.3.4", "de"), snapshot("5.6.7.8", "fr")]);

        // Completes without panicking once the stream ends
        write_status(store.clone(), updates, IconTheme::default()).await;

        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn writes_file_through_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStatusStore::new(dir.path().join("status.json"));
        let updates = tokio_stream::iter(vec![snapshot("1.2.3.4", "de")]);

        write_status(store.clone(), updates, IconTheme::default()).await;

        let report = store.load().into_report().unwrap();
        assert_eq!(report.snapshot.address.as_deref(), Some("1.2.3.4"));
    }
}
