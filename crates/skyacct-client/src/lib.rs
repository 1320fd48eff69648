//! HTTP client for the Sky account service.
//!
//! [`ApiClient`] is the entry point. It hands out borrowed sub-clients:
//!
//! - [`ApiClient::accounts`] for the generic, kind-resolving account endpoints
//! - [`ApiClient::kind`] and its shorthands for the per-kind collections
//! - [`ApiClient::memberships`], [`ApiClient::links`],
//!   [`ApiClient::permissions`] and [`ApiClient::tokens`]
//!
//! Requests go through a [`Transport`](skyacct_core::transport::Transport);
//! [`ReqwestTransport`] is the default.

pub mod accounts;
pub mod client;
pub mod config;
mod exchange;
pub mod http;
pub mod kinds;
pub mod links;
pub mod memberships;
pub mod permissions;
pub mod tokens;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use http::ReqwestTransport;
pub use skyacct_core::{Error, Result};
