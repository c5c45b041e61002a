//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ipflag: public IP country monitor
///
/// Watches the public IP address, resolves its country, shows the
/// matching flag and notifies when the address changes.
#[derive(Debug, Parser)]
#[command(name = "ipflag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Address lookup endpoint returning `{"ip": "..."}`
    #[arg(long = "address-url", value_name = "URL")]
    pub address_url: Option<String>,

    /// Geolocation endpoint; the address is appended as a path segment
    #[arg(long = "geo-url", value_name = "URL")]
    pub geo_url: Option<String>,

    /// HTTP request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Check interval in seconds
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Keepalive heartbeat interval in seconds
    #[arg(long = "keepalive-interval", value_name = "SECS")]
    pub keepalive_interval: Option<u64>,

    /// Path of the status file written after each change
    #[arg(long = "status-file", global = true)]
    pub status_file: Option<PathBuf>,

    /// Directory containing `<code>.png` flag images
    #[arg(long = "flags-dir")]
    pub flags_dir: Option<PathBuf>,

    /// Icon shown when no country is known
    #[arg(long = "default-icon")]
    pub default_icon: Option<PathBuf>,

    /// Webhook URL receiving change notifications
    #[arg(long = "notify-url", value_name = "URL")]
    pub notify_url: Option<String>,

    /// HTTP method for the notification webhook
    #[arg(long = "notify-method")]
    pub notify_method: Option<String>,

    /// Webhook headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "notify-header", value_name = "K=V")]
    pub notify_headers: Vec<String>,

    /// Bearer token for the webhook Authorization header
    #[arg(long = "notify-bearer")]
    pub notify_bearer: Option<String>,

    /// Handlebars body template for the webhook
    #[arg(long = "notify-template")]
    pub notify_template: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ipflag
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ipflag.toml")]
        output: PathBuf,
    },

    /// Print the last snapshot recorded by a running monitor
    Status,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if this is the status command.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self.command, Some(Command::Status))
    }
}
