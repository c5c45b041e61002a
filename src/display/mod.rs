//! Icon display for the current country.
//!
//! This module provides:
//! - The logical icon to show ([`Icon`])
//! - Its resolution to image paths ([`IconTheme`], [`IconRef`])
//! - The display sink ([`IconSink`], [`LogIconSink`])

mod icon;
mod sink;

#[cfg(test)]
mod icon_tests;

pub use icon::{FLAG_SIZES, Icon, IconRef, IconTheme};
pub use sink::{IconSink, LogIconSink};
