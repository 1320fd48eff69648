//! Core types and trait definitions for the Sky account-management client.
//!
//! This crate is deliberately free of HTTP dependencies. It holds the account
//! model, the kind resolver, the path builder and the [`Transport`] seam that
//! `skyacct-client` implements over reqwest.
//!
//! [`Transport`]: transport::Transport

pub mod account;
pub mod error;
pub mod kind;
pub mod kinds;
pub mod link;
pub mod membership;
pub mod path;
pub mod permission;
pub mod resolve;
pub mod role;
pub mod service_account;
pub mod token;
pub mod transport;
pub mod validate;

pub use error::{Error, Result};
