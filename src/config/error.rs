//! Errors raised while building ipflag's configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Why the command line and config file could not be turned into a
/// [`ValidatedConfig`](super::ValidatedConfig).
///
/// All of these exit with the configuration error code before any lookup
/// runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path after `~` expansion
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML, has an unknown section or key, or
    /// a value of the wrong type.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `ipflag init` could not write the template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Output path given to `init`
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A setting needed by another choice is absent: `notify.url` when other
    /// webhook options are set, or `status_file` for `ipflag status`.
    #[error("Missing {field}. {hint}")]
    MissingRequired {
        /// One of the [`field`] names
        field: &'static str,
        /// Which flag or key supplies it
        hint: &'static str,
    },

    /// An address, geolocation, or webhook URL does not parse, or the
    /// geolocation URL cannot take the address as a path segment.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Parser message
        reason: String,
    },

    /// `interval`, `keepalive_interval`, or `timeout` is zero.
    #[error("{field} {reason}")]
    InvalidDuration {
        /// Setting name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The webhook method is not a valid HTTP method.
    #[error("Invalid webhook method '{0}'")]
    InvalidMethod(String),

    /// A `--notify-header` argument has no `=` or `:` separator.
    #[error("Invalid --notify-header '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// Argument as given
        value: String,
    },

    /// A webhook header name is not a legal HTTP token.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// Name as given
        name: String,
        /// Parser message
        reason: String,
    },

    /// A webhook header value, or the bearer token, has bytes HTTP forbids.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// Header the value was meant for
        name: String,
        /// Parser message
        reason: String,
    },

    /// The webhook body template does not compile.
    #[error("Invalid body template: {reason}")]
    InvalidTemplate {
        /// Handlebars message
        reason: String,
    },
}

/// Settings that can be reported by [`ConfigError::MissingRequired`].
pub mod field {
    /// Webhook endpoint, needed once any other webhook option is set.
    pub const NOTIFY_URL: &str = "notify.url";
    /// Status file path, needed by `ipflag status`.
    pub const STATUS_FILE: &str = "status_file";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
