//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Lookup service configuration
    #[serde(default)]
    pub lookup: LookupSection,

    /// Monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Icon image locations
    #[serde(default)]
    pub icon: IconSection,

    /// Notification webhook configuration
    #[serde(default)]
    pub notify: NotifySection,
}

/// Lookup service configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupSection {
    /// Address lookup endpoint
    pub address_url: Option<String>,

    /// Geolocation endpoint
    pub geo_url: Option<String>,

    /// HTTP timeout in seconds
    pub timeout: Option<u64>,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Check interval in seconds
    pub interval: Option<u64>,

    /// Keepalive heartbeat interval in seconds
    pub keepalive_interval: Option<u64>,

    /// Status file path
    pub status_file: Option<String>,
}

/// Icon configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSection {
    /// Directory of flag images
    pub flags_dir: Option<String>,

    /// Icon used when no country is known
    pub default_icon: Option<String>,
}

/// Notification webhook section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// Webhook URL
    pub url: Option<String>,

    /// HTTP method (default: POST)
    pub method: Option<String>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Bearer token for Authorization header
    pub bearer: Option<String>,

    /// Handlebars body template
    pub body_template: Option<String>,
}

impl NotifySection {
    /// Returns true if any webhook option other than `url` is set.
    #[must_use]
    pub fn has_options(&self) -> bool {
        self.method.is_some()
            || !self.headers.is_empty()
            || self.bearer.is_some()
            || self.body_template.is_some()
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipflag configuration file

[lookup]
# Address lookup endpoint, must answer {"ip": "..."}
# address_url = "https://api.ipify.org?format=json"

# Geolocation endpoint, the address is appended as a path segment
# geo_url = "https://ipwho.is/"

# HTTP timeout in seconds (default: none)
# timeout = 15

[monitor]
# Check interval in seconds (default: 10)
interval = 10

# Keepalive heartbeat interval in seconds (default: 20)
# keepalive_interval = 20

# Status file read by `ipflag status` (default: none)
# Paths starting with ~ are expanded to the home directory
# status_file = "~/.ipflag/status.json"

[icon]
# Directory containing <code>.png flag images (default: flags)
# flags_dir = "flags"

# Icon shown when no country is known (default: icon.png)
# default_icon = "icon.png"

[notify]
# Webhook receiving change notifications (default: log only)
# url = "https://api.example.com/notify"

# HTTP method (default: POST)
# method = "POST"

# HTTP headers
# [notify.headers]
# X-Custom-Header = "value"

# Bearer token for Authorization header
# bearer = "your-token-here"

# Handlebars body template (default: the notification as JSON)
# Available variables: {{title}}, {{message}}, {{address}}, {{previous_address}},
# {{country}}, {{country_code}}, {{timestamp}}
# body_template = '{"text": "{{message}}"}'
"#
    .to_string()
}
