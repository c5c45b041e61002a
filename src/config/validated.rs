//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use handlebars::Handlebars;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use url::Url;

use crate::display::IconTheme;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Every option has a default, so an empty command line is valid.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Address lookup endpoint
    pub address_url: Url,

    /// Geolocation endpoint (address appended as a path segment)
    pub geo_url: Url,

    /// HTTP timeout for lookups and webhooks. `None` keeps the client default.
    pub timeout: Option<Duration>,

    /// Time between check cycles
    pub interval: Duration,

    /// Time between keepalive heartbeats
    pub keepalive_interval: Duration,

    /// Status file path. If `None`, no status file is written.
    pub status_file: Option<PathBuf>,

    /// Flag and default icon locations
    pub icon_theme: IconTheme,

    /// Webhook notification settings. If `None`, notifications are only logged.
    pub notify: Option<NotifyConfig>,

    /// Verbose logging enabled
    pub verbose: bool,
}

/// Validated webhook notification settings.
#[derive(Debug)]
pub struct NotifyConfig {
    /// Webhook URL
    pub url: Url,

    /// HTTP method for webhook requests
    pub method: Method,

    /// HTTP headers for webhook requests
    pub headers: HeaderMap,

    /// Handlebars body template (optional)
    pub body_template: Option<String>,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_file_str = self
            .status_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());
        let timeout_str = self
            .timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));
        let notify_str = self
            .notify
            .as_ref()
            .map_or_else(|| "log".to_string(), |n| format!("{} {}", n.method, n.url));

        write!(
            f,
            "Config {{ address_url: {}, geo_url: {}, timeout: {}, interval: {}s, \
             keepalive: {}s, status_file: {}, flags_dir: {}, notify: {} }}",
            self.address_url,
            self.geo_url,
            timeout_str,
            self.interval.as_secs(),
            self.keepalive_interval.as_secs(),
            status_file_str,
            self.icon_theme.flags_dir.display(),
            notify_str,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A URL is invalid, or the geolocation URL cannot take path segments
    /// - A duration value is zero
    /// - Webhook options are given without a webhook URL
    /// - The method, a header, or the body template is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let address_url = Self::resolve_address_url(cli, toml)?;
        let geo_url = Self::resolve_geo_url(cli, toml)?;

        let timeout = Self::resolve_timeout(cli, toml)?;

        let interval = resolve_secs(
            "interval",
            cli.interval,
            toml.and_then(|t| t.monitor.interval),
            defaults::INTERVAL_SECS,
        )?;

        let keepalive_interval = resolve_secs(
            "keepalive_interval",
            cli.keepalive_interval,
            toml.and_then(|t| t.monitor.keepalive_interval),
            defaults::KEEPALIVE_INTERVAL_SECS,
        )?;

        let status_file = Self::resolve_status_file(cli, toml);
        let icon_theme = Self::resolve_icon_theme(cli, toml);
        let notify = Self::resolve_notify(cli, toml)?;

        Ok(Self {
            address_url,
            geo_url,
            timeout,
            interval,
            keepalive_interval,
            status_file,
            icon_theme,
            notify,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_tilde(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_address_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .address_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.lookup.address_url.as_deref()))
            .unwrap_or(defaults::ADDRESS_URL);

        parse_url(url_str)
    }

    fn resolve_geo_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .geo_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.lookup.geo_url.as_deref()))
            .unwrap_or(defaults::GEO_URL);

        let url = parse_url(url_str)?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "cannot append the address as a path segment".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Duration>, ConfigError> {
        let Some(seconds) = cli.timeout.or_else(|| toml.and_then(|t| t.lookup.timeout)) else {
            return Ok(None);
        };

        if seconds == 0 {
            return Err(zero_duration("timeout"));
        }

        Ok(Some(Duration::from_secs(seconds)))
    }

    fn resolve_status_file(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        // CLI takes precedence
        if let Some(ref path) = cli.status_file {
            return Some(expand_tilde(path));
        }

        toml.and_then(|t| t.monitor.status_file.as_deref())
            .map(|p| expand_tilde(Path::new(p)))
    }

    fn resolve_icon_theme(cli: &Cli, toml: Option<&TomlConfig>) -> IconTheme {
        let flags_dir = cli.flags_dir.clone().unwrap_or_else(|| {
            PathBuf::from(
                toml.and_then(|t| t.icon.flags_dir.as_deref())
                    .unwrap_or(defaults::FLAGS_DIR),
            )
        });

        let default_icon = cli.default_icon.clone().unwrap_or_else(|| {
            PathBuf::from(
                toml.and_then(|t| t.icon.default_icon.as_deref())
                    .unwrap_or(defaults::DEFAULT_ICON),
            )
        });

        IconTheme::new(expand_tilde(&flags_dir), expand_tilde(&default_icon))
    }

    fn resolve_notify(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<NotifyConfig>, ConfigError> {
        let url_str = cli
            .notify_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.url.as_deref()));

        let Some(url_str) = url_str else {
            let cli_has_options = cli.notify_method.is_some()
                || !cli.notify_headers.is_empty()
                || cli.notify_bearer.is_some()
                || cli.notify_template.is_some();
            let toml_has_options = toml.is_some_and(|t| t.notify.has_options());

            if cli_has_options || toml_has_options {
                return Err(ConfigError::missing(
                    field::NOTIFY_URL,
                    "Webhook options need --notify-url or notify.url in config file",
                ));
            }
            return Ok(None);
        };

        Ok(Some(NotifyConfig {
            url: parse_url(url_str)?,
            method: Self::resolve_method(cli, toml)?,
            headers: Self::resolve_headers(cli, toml)?,
            body_template: Self::resolve_body_template(cli, toml)?,
        }))
    }

    fn resolve_method(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let method_str = cli
            .notify_method
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        method_str
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so CLI can override
        if let Some(toml) = toml {
            for (name, value) in &toml.notify.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.notify_headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        let bearer = cli
            .notify_bearer
            .as_deref()
            .or_else(|| toml.and_then(|t| t.notify.bearer.as_deref()));

        if let Some(token) = bearer {
            let auth_value = format!("Bearer {token}");
            let header_value = parse_header_value("Authorization", &auth_value)?;
            headers.insert(AUTHORIZATION, header_value);
        }

        Ok(headers)
    }

    fn resolve_body_template(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<String>, ConfigError> {
        let template = cli
            .notify_template
            .clone()
            .or_else(|| toml.and_then(|t| t.notify.body_template.clone()));

        if let Some(ref tmpl) = template {
            Self::validate_template(tmpl)?;
        }

        Ok(template)
    }

    fn validate_template(template: &str) -> Result<(), ConfigError> {
        let hbs = Handlebars::new();
        // Syntax check only; missing variables render empty
        hbs.render_template(template, &serde_json::json!({}))
            .map_err(|e| ConfigError::InvalidTemplate {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

// Helper functions

fn resolve_secs(
    name: &'static str,
    cli: Option<u64>,
    toml: Option<u64>,
    default: u64,
) -> Result<Duration, ConfigError> {
    // Priority: CLI explicit > TOML > default
    let seconds = cli.or(toml).unwrap_or(default);

    if seconds == 0 {
        return Err(zero_duration(name));
    }

    Ok(Duration::from_secs(seconds))
}

fn zero_duration(field: &'static str) -> ConfigError {
    ConfigError::InvalidDuration {
        field,
        reason: "must be greater than 0".to_string(),
    }
}

fn parse_url(s: &str) -> Result<Url, ConfigError> {
    Url::parse(s).map_err(|e| ConfigError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
