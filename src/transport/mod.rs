//! HTTP transport shared by the lookup services and the webhook notifier.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction ([`HttpClient`])
//! - The production client backed by reqwest ([`ReqwestClient`])
//! - Transport errors ([`HttpError`])

mod client;
mod error;
mod request;

#[cfg(test)]
pub mod mock;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
