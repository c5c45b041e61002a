//! ipflag: public IP country monitor
//!
//! A library for watching the machine's public IP address, resolving its
//! country, showing the matching flag icon and notifying on changes.

pub mod config;
pub mod display;
pub mod lookup;
pub mod monitor;
pub mod notify;
pub mod status;
pub mod transport;
